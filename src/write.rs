use crate::error::{AppendError, Result};
use arrow::{csv::WriterBuilder, record_batch::RecordBatch};
use std::{fs::File, path::Path};
use tracing::info;

/// Serialize `batch` to a CSV file: header row of column names in table
/// order, one line per row, fields quoted only when they need it. No row
/// index column is emitted.
pub fn write_csv<P: AsRef<Path>>(batch: &RecordBatch, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| AppendError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;

    info!(path = %path.display(), rows = batch.num_rows(), "wrote merged CSV");
    Ok(())
}
