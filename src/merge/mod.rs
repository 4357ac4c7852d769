use crate::error::Result;
use crate::load::schema::ColumnType;
use arrow::{
    array::{new_null_array, ArrayRef},
    compute::{cast, concat},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;
use tracing::debug;

pub mod aggregate;

/// Stack `b`'s rows under `a`'s, under the union of both schemas. `a`'s
/// columns keep their positions; columns only in `b` follow in `b`'s order.
/// A column missing from one input contributes nulls for that input's rows.
pub fn concat_tables(a: &RecordBatch, b: &RecordBatch) -> Result<RecordBatch> {
    let (sa, sb) = (a.schema(), b.schema());

    let mut fields: Vec<Field> = Vec::with_capacity(sa.fields().len() + sb.fields().len());
    for fa in sa.fields() {
        let dtype = match sb.column_with_name(fa.name()) {
            Some((_, fb)) => unified_type(fa.data_type(), fb.data_type()),
            None => fa.data_type().clone(),
        };
        fields.push(Field::new(fa.name(), dtype, true));
    }
    for fb in sb.fields() {
        if sa.column_with_name(fb.name()).is_none() {
            fields.push(Field::new(fb.name(), fb.data_type().clone(), true));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let top = column_or_nulls(a, field)?;
        let bottom = column_or_nulls(b, field)?;
        columns.push(concat(&[top.as_ref(), bottom.as_ref()])?);
    }

    debug!(
        rows = a.num_rows() + b.num_rows(),
        columns = schema.fields().len(),
        "concatenated inputs"
    );
    let options = RecordBatchOptions::new().with_row_count(Some(a.num_rows() + b.num_rows()));
    RecordBatch::try_new_with_options(schema, columns, &options).map_err(Into::into)
}

/// The batch's column cast to the union type, or all nulls if it has none.
fn column_or_nulls(batch: &RecordBatch, field: &Field) -> Result<ArrayRef> {
    match batch.schema().column_with_name(field.name()) {
        Some((idx, _)) => cast(batch.column(idx), field.data_type()).map_err(Into::into),
        None => Ok(new_null_array(field.data_type(), batch.num_rows())),
    }
}

/// Int64 + Float64 widens to Float64; text absorbs numbers.
fn unified_type(a: &DataType, b: &DataType) -> DataType {
    match (ColumnType::from_arrow(a), ColumnType::from_arrow(b)) {
        (Some(ta), Some(tb)) => ta.widen(tb).arrow_type(),
        _ => DataType::Utf8,
    }
}
