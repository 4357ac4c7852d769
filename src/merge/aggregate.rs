use crate::error::{AppendError, Result};
use crate::normalize::{ISO3, YEAR};
use arrow::{
    array::{
        Array, ArrayRef, Float64Array, Float64Builder, Int64Array, Int64Builder, StringArray,
        UInt64Array,
    },
    compute::take,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};
use tracing::debug;

/// A group key value, ordered so output rows come out ascending.
#[derive(Debug, Clone)]
enum KeyValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl KeyValue {
    fn rank(&self) -> u8 {
        match self {
            KeyValue::Int(_) => 0,
            KeyValue::Float(_) => 1,
            KeyValue::Text(_) => 2,
        }
    }
}

impl Ord for KeyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use KeyValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            // a key column has one concrete type, so mixed variants only
            // meet across the two columns, never inside one ordering
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyValue {}

fn key_at(arr: &dyn Array, row: usize) -> Option<KeyValue> {
    if arr.is_null(row) {
        return None;
    }
    if let Some(ints) = arr.as_any().downcast_ref::<Int64Array>() {
        return Some(KeyValue::Int(ints.value(row)));
    }
    if let Some(floats) = arr.as_any().downcast_ref::<Float64Array>() {
        return Some(KeyValue::Float(floats.value(row)));
    }
    arr.as_any()
        .downcast_ref::<StringArray>()
        .map(|strs| KeyValue::Text(strs.value(row).to_string()))
}

/// Collapse rows sharing a (Year, ISO3) pair into one row, summing every
/// other column. Output rows are sorted ascending by Year then ISO3, with
/// the key columns leading and the remaining columns in table order.
pub fn sum_by_keys(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let year_idx = schema
        .index_of(YEAR)
        .map_err(|_| AppendError::MissingKeyColumn(YEAR))?;
    let iso3_idx = schema
        .index_of(ISO3)
        .map_err(|_| AppendError::MissingKeyColumn(ISO3))?;

    // every non-key column must be summable before any grouping work happens
    let mut value_indices = Vec::new();
    for (idx, field) in schema.fields().iter().enumerate() {
        if idx == year_idx || idx == iso3_idx {
            continue;
        }
        match field.data_type() {
            DataType::Int64 | DataType::Float64 => value_indices.push(idx),
            _ => return Err(AppendError::NonNumericColumn(field.name().clone())),
        }
    }

    // BTreeMap gives the ascending (Year, ISO3) output order for free
    let year_col = batch.column(year_idx);
    let iso3_col = batch.column(iso3_idx);
    let mut grouped: BTreeMap<(KeyValue, KeyValue), Vec<usize>> = BTreeMap::new();
    for row in 0..batch.num_rows() {
        let (Some(year), Some(iso3)) = (key_at(year_col.as_ref(), row), key_at(iso3_col.as_ref(), row))
        else {
            // a row with a null key belongs to no group
            continue;
        };
        grouped.entry((year, iso3)).or_default().push(row);
    }
    let groups: Vec<Vec<usize>> = grouped.into_values().collect();
    debug!(
        groups = groups.len(),
        rows = batch.num_rows(),
        "grouped by (Year, ISO3)"
    );

    // key columns carry the first contributing row of each group
    let firsts = UInt64Array::from(
        groups
            .iter()
            .map(|rows| rows[0] as u64)
            .collect::<Vec<_>>(),
    );
    let mut columns: Vec<ArrayRef> = vec![
        take(year_col.as_ref(), &firsts, None)?,
        take(iso3_col.as_ref(), &firsts, None)?,
    ];
    let mut fields = vec![
        Field::new(YEAR, year_col.data_type().clone(), false),
        Field::new(ISO3, iso3_col.data_type().clone(), false),
    ];

    for &idx in &value_indices {
        let field = schema.field(idx);
        fields.push(Field::new(field.name(), field.data_type().clone(), false));
        columns.push(sum_column(batch.column(idx), &groups, field.name())?);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).map_err(Into::into)
}

/// Sum one column per group. Nulls count as zero; an all-null group sums to 0.
fn sum_column(col: &ArrayRef, groups: &[Vec<usize>], name: &str) -> Result<ArrayRef> {
    if let Some(ints) = col.as_any().downcast_ref::<Int64Array>() {
        let mut b = Int64Builder::with_capacity(groups.len());
        for rows in groups {
            let mut total = 0i64;
            for &row in rows {
                if !ints.is_null(row) {
                    total += ints.value(row);
                }
            }
            b.append_value(total);
        }
        return Ok(Arc::new(b.finish()));
    }
    if let Some(floats) = col.as_any().downcast_ref::<Float64Array>() {
        let mut b = Float64Builder::with_capacity(groups.len());
        for rows in groups {
            let mut total = 0f64;
            for &row in rows {
                if !floats.is_null(row) {
                    total += floats.value(row);
                }
            }
            b.append_value(total);
        }
        return Ok(Arc::new(b.finish()));
    }
    Err(AppendError::NonNumericColumn(name.to_string()))
}
