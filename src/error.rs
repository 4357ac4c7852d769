use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppendError {
    #[error("cannot access {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no {0:?} column after normalization; cannot group")]
    MissingKeyColumn(&'static str),

    #[error("column {0:?} is not numeric and cannot be summed")]
    NonNumericColumn(String),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, AppendError>;
