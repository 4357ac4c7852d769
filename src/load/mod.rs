use crate::error::{AppendError, Result};
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

pub mod convert;
pub mod schema;
pub mod utils;

use utils::clean_str;

/// Header names plus data rows as raw strings, straight from the CSV parser.
#[derive(Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse `path` into a typed table: read header + records, infer a type for
/// each column from its values, then build the typed columns.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let raw = read_raw(path.as_ref())?;
    debug!(
        columns = raw.headers.len(),
        rows = raw.rows.len(),
        "parsed CSV"
    );
    let info = schema::analyze_raw_table(&raw);
    convert::convert_to_typed(&raw, &info)
}

/// Read the file into a `RawTable`. The reader is strict: records whose field
/// count differs from the header surface as a parse error.
fn read_raw(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|source| AppendError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| AppendError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(clean_str)
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| AppendError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}
