use crate::error::Result;
use arrow::{
    datatypes::{Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

/// Canonical names for the two merge keys.
pub const YEAR: &str = "Year";
pub const ISO3: &str = "ISO3";

/// Rename key columns to their canonical spelling: any case variant of
/// "iso3" becomes "ISO3", any case variant of "year" becomes "Year". Other
/// names pass through untouched. Column data is shared, not copied.
pub fn normalize_columns(batch: &RecordBatch) -> Result<RecordBatch> {
    let fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|f| Field::new(canonical_name(f.name()), f.data_type().clone(), true))
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        batch.columns().to_vec(),
        &options,
    )
    .map_err(Into::into)
}

fn canonical_name(name: &str) -> String {
    if name.eq_ignore_ascii_case("iso3") {
        ISO3.to_string()
    } else if name.eq_ignore_ascii_case("year") {
        YEAR.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array};
    use arrow::datatypes::DataType;

    fn batch_with_columns(names: &[&str]) -> RecordBatch {
        let fields: Vec<Field> = names
            .iter()
            .map(|n| Field::new(*n, DataType::Int64, true))
            .collect();
        let columns: Vec<ArrayRef> = names
            .iter()
            .map(|_| Arc::new(Int64Array::from(vec![1])) as ArrayRef)
            .collect();
        RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap()
    }

    fn column_names(batch: &RecordBatch) -> Vec<String> {
        batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    #[test]
    fn renames_case_variants_of_the_keys() {
        let batch = batch_with_columns(&["year", "iso3", "Value"]);
        let out = normalize_columns(&batch).unwrap();
        assert_eq!(column_names(&out), vec!["Year", "ISO3", "Value"]);

        let batch = batch_with_columns(&["YEAR", "Iso3", "value"]);
        let out = normalize_columns(&batch).unwrap();
        assert_eq!(column_names(&out), vec!["Year", "ISO3", "value"]);
    }

    #[test]
    fn other_names_keep_their_case() {
        let batch = batch_with_columns(&["GDP_usd", "myYearly", "iso_code"]);
        let out = normalize_columns(&batch).unwrap();
        assert_eq!(column_names(&out), vec!["GDP_usd", "myYearly", "iso_code"]);
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let batch = batch_with_columns(&["yEaR", "ISO3", "Value"]);
        let once = normalize_columns(&batch).unwrap();
        let twice = normalize_columns(&once).unwrap();
        assert_eq!(column_names(&once), column_names(&twice));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_table_is_a_no_op() {
        let schema = Arc::new(Schema::empty());
        let options = RecordBatchOptions::new().with_row_count(Some(0));
        let batch = RecordBatch::try_new_with_options(schema, vec![], &options).unwrap();
        let out = normalize_columns(&batch).unwrap();
        assert_eq!(out.num_columns(), 0);
    }
}
