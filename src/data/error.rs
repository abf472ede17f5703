use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – the "data unavailable" taxonomy
// ---------------------------------------------------------------------------

/// Total-failure conditions of the data layer: the source file cannot be
/// turned into a dataset at all.  Per-cell parse failures are *not* errors;
/// they are recovered locally by the coerce-or-missing helpers and the row
/// is dropped instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("{0}")]
    InvalidData(String),
}
