pub mod error;
pub mod load;
pub mod merge;
pub mod normalize;
pub mod write;

pub use error::{AppendError, Result};

use std::path::Path;
use tracing::info;

/// Merge two CSV datasets keyed by (Year, ISO3) into `output`: load both
/// files, canonicalize the key column names, concatenate the rows, sum
/// duplicate keys, and write the result.
pub fn append_csv<P: AsRef<Path>>(file1: P, file2: P, output: P) -> Result<()> {
    let first = normalize::normalize_columns(&load::load_csv(&file1)?)?;
    let second = normalize::normalize_columns(&load::load_csv(&file2)?)?;

    let combined = merge::concat_tables(&first, &second)?;
    let merged = merge::aggregate::sum_by_keys(&combined)?;
    info!(
        input_rows = combined.num_rows(),
        output_rows = merged.num_rows(),
        "merged tables"
    );

    write::write_csv(&merged, &output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn same_key_rows_merge_across_files() {
        let dir = TempDir::new().unwrap();
        let a = write_input(&dir, "a.csv", "Year,ISO3,Value\n2020,USA,10\n");
        let b = write_input(&dir, "b.csv", "year,iso3,Value\n2020,USA,5\n");
        let out = dir.path().join("out.csv");

        append_csv(&a, &b, &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "Year,ISO3,Value\n2020,USA,15\n"
        );
    }

    #[test]
    fn distinct_years_stay_separate_and_sorted() {
        let dir = TempDir::new().unwrap();
        let a = write_input(&dir, "a.csv", "Year,ISO3,Value\n2019,FRA,3\n");
        let b = write_input(&dir, "b.csv", "Year,ISO3,Value\n2020,FRA,4\n");
        let out = dir.path().join("out.csv");

        append_csv(&a, &b, &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "Year,ISO3,Value\n2019,FRA,3\n2020,FRA,4\n"
        );
    }

    #[test]
    fn swapping_the_inputs_gives_the_same_output() {
        let dir = TempDir::new().unwrap();
        let a = write_input(
            &dir,
            "a.csv",
            "Year,ISO3,Value\n2020,USA,10\n2019,AUS,1\n",
        );
        let b = write_input(&dir, "b.csv", "Year,ISO3,Value\n2020,USA,5\n2020,NZL,2\n");
        let ab = dir.path().join("ab.csv");
        let ba = dir.path().join("ba.csv");

        append_csv(&a, &b, &ab).unwrap();
        append_csv(&b, &a, &ba).unwrap();
        assert_eq!(
            fs::read_to_string(&ab).unwrap(),
            fs::read_to_string(&ba).unwrap()
        );
    }

    #[test]
    fn columns_missing_from_one_file_sum_as_zero() {
        let dir = TempDir::new().unwrap();
        let a = write_input(&dir, "a.csv", "Year,ISO3,Gdp\n2020,USA,10\n");
        let b = write_input(&dir, "b.csv", "Year,ISO3,Pop\n2020,USA,5\n");
        let out = dir.path().join("out.csv");

        append_csv(&a, &b, &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "Year,ISO3,Gdp,Pop\n2020,USA,10,5\n"
        );
    }

    #[test]
    fn text_metric_column_fails_with_its_name() {
        let dir = TempDir::new().unwrap();
        let a = write_input(&dir, "a.csv", "Year,ISO3,Region\n2020,USA,Americas\n");
        let b = write_input(&dir, "b.csv", "Year,ISO3,Region\n2020,FRA,Europe\n");
        let out = dir.path().join("out.csv");

        let err = append_csv(&a, &b, &out).unwrap_err();
        match err {
            AppendError::NonNumericColumn(name) => assert_eq!(name, "Region"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn inputs_without_key_columns_fail() {
        let dir = TempDir::new().unwrap();
        let a = write_input(&dir, "a.csv", "Country,Value\nUSA,10\n");
        let b = write_input(&dir, "b.csv", "Country,Value\nFRA,5\n");
        let out = dir.path().join("out.csv");

        let err = append_csv(&a, &b, &out).unwrap_err();
        assert!(matches!(err, AppendError::MissingKeyColumn(_)));
    }
}
