use shared_types::OverallStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("'{file_name}' declares status {declared} but its rules imply {derived}")]
    InvariantViolation {
        file_name: String,
        declared: OverallStatus,
        derived: OverallStatus,
    },
}

impl From<shared_types::StatusMismatch> for ReportError {
    fn from(err: shared_types::StatusMismatch) -> Self {
        ReportError::InvariantViolation {
            file_name: err.file_name,
            declared: err.declared,
            derived: err.derived,
        }
    }
}
