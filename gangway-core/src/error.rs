use thiserror::Error;

#[derive(Error, Debug)]
pub enum GangwayError {
    #[error("Application binary not found: {0}")]
    BinaryNotFound(String),

    #[error("Invalid port value: {0}")]
    InvalidPort(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GangwayError>;
