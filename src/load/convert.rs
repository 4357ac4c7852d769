use super::schema::{ColumnType, SchemaInfo};
use super::utils::clean_str;
use super::RawTable;
use crate::error::Result;
use arrow::{
    array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

/// Convert string cells into the inferred column types. Empty cells and
/// unparseable numerics become nulls.
pub fn convert_to_typed(raw: &RawTable, info: &SchemaInfo) -> Result<RecordBatch> {
    let mut out: Vec<ArrayRef> = Vec::with_capacity(raw.headers.len());

    for (idx, ty) in info.column_types.iter().enumerate() {
        match ty {
            ColumnType::Int64 => {
                let mut b = Int64Builder::with_capacity(raw.rows.len());
                for row in &raw.rows {
                    let cell = clean_str(&row[idx]);
                    b.append_option(if cell.is_empty() {
                        None
                    } else {
                        cell.parse::<i64>().ok()
                    });
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
            ColumnType::Float64 => {
                let mut b = Float64Builder::with_capacity(raw.rows.len());
                for row in &raw.rows {
                    let cell = clean_str(&row[idx]);
                    b.append_option(if cell.is_empty() {
                        None
                    } else {
                        cell.parse::<f64>().ok()
                    });
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
            ColumnType::Utf8 => {
                let mut b = StringBuilder::new();
                for row in &raw.rows {
                    let cell = clean_str(&row[idx]);
                    if cell.is_empty() {
                        b.append_null();
                    } else {
                        b.append_value(cell);
                    }
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
        }
    }

    let options = RecordBatchOptions::new().with_row_count(Some(raw.rows.len()));
    RecordBatch::try_new_with_options(Arc::new(info.schema.clone()), out, &options)
        .map_err(Into::into)
}
