use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Invalid sample size: requested {requested}, population has {population} units")]
    InvalidSampleSize { requested: usize, population: usize },

    #[error("Degenerate allocation: stratum '{stratum}' assigned {target} of {population} units")]
    DegenerateAllocation {
        stratum: String,
        target: i64,
        population: usize,
    },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}
