use super::utils::clean_str;
use super::RawTable;
use arrow::datatypes::{DataType, Field, Schema};

/// The value types a CSV column can resolve to. Inference starts narrow and
/// widens: Int64 → Float64 → Utf8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Float64,
    Utf8,
}

impl ColumnType {
    /// Narrowest type that can hold a single cell.
    pub fn of(cell: &str) -> ColumnType {
        if cell.parse::<i64>().is_ok() {
            ColumnType::Int64
        } else if cell.parse::<f64>().is_ok() {
            ColumnType::Float64
        } else {
            ColumnType::Utf8
        }
    }

    /// Widest of two types; Utf8 absorbs everything.
    pub fn widen(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (Int64, Int64) => Int64,
            (Utf8, _) | (_, Utf8) => Utf8,
            _ => Float64,
        }
    }

    pub fn arrow_type(self) -> DataType {
        match self {
            ColumnType::Int64 => DataType::Int64,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::Utf8 => DataType::Utf8,
        }
    }

    pub fn from_arrow(dtype: &DataType) -> Option<ColumnType> {
        match dtype {
            DataType::Int64 => Some(ColumnType::Int64),
            DataType::Float64 => Some(ColumnType::Float64),
            DataType::Utf8 => Some(ColumnType::Utf8),
            _ => None,
        }
    }
}

/// Resolved arrow schema for a raw table plus the per-column types driving
/// the string → typed conversion.
pub struct SchemaInfo {
    pub schema: Schema,
    pub column_types: Vec<ColumnType>,
}

/// Walk every cell once and narrow each column to the widest type its values
/// need. Empty cells don't vote; a column with no non-empty values stays Utf8.
pub fn analyze_raw_table(raw: &RawTable) -> SchemaInfo {
    let mut column_types = Vec::with_capacity(raw.headers.len());

    for (idx, _) in raw.headers.iter().enumerate() {
        let mut resolved: Option<ColumnType> = None;
        for row in &raw.rows {
            let cell = clean_str(&row[idx]);
            if cell.is_empty() {
                continue;
            }
            let ty = ColumnType::of(&cell);
            resolved = Some(match resolved {
                Some(current) => current.widen(ty),
                None => ty,
            });
            if resolved == Some(ColumnType::Utf8) {
                break;
            }
        }
        column_types.push(resolved.unwrap_or(ColumnType::Utf8));
    }

    let fields: Vec<Field> = raw
        .headers
        .iter()
        .zip(&column_types)
        .map(|(name, ty)| Field::new(name, ty.arrow_type(), true))
        .collect();

    SchemaInfo {
        schema: Schema::new(fields),
        column_types,
    }
}
