use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Trade not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid data: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Parse(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for JournalError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        JournalError::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, JournalError>;
