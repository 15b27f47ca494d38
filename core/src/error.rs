use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkforceError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config at '{path}': {reason}")]
    Config { path: String, reason: String },

    #[error("Input has no header row")]
    MissingHeader,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type WorkforceResult<T> = Result<T, WorkforceError>;
