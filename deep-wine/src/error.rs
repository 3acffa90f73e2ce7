use std::path::PathBuf;

use deep_core::DeepError;
use thiserror::Error;

/// Errors of the wine-quality pipeline.
#[derive(Error, Debug)]
pub enum WineError {
    #[error(transparent)]
    Deep(#[from] DeepError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed row {row} in {}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("Unknown dataset variant '{0}', expected \"white\" or \"red\"")]
    InvalidVariant(String),

    #[error("Dataset contains no rows")]
    EmptyDataset,
}
