use std::path::PathBuf;

use gestura_core::GestureError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("recognizer error: {0}")]
    Gesture(#[from] GestureError),

    #[error("scenario not found: {path}")]
    MissingScenario { path: PathBuf },

    #[error("invalid trace line {line}: {message}")]
    InvalidTrace { line: usize, message: String },

    #[error("trace differs from golden at entry {index}")]
    GoldenMismatch { index: usize },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::GoldenMismatch { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
