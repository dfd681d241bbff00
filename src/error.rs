//! Error types shared by the platform boundary and the sync core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AxError {
    #[error("Accessibility access not granted")]
    PermissionDenied,

    #[error("Failed to read {attribute}: AXError {code}")]
    QueryFailed { attribute: &'static str, code: i32 },

    #[error("Failed to write {attribute}: AXError {code}")]
    WriteFailed { attribute: &'static str, code: i32 },

    #[error("Unexpected value type for {attribute}")]
    UnexpectedValue { attribute: &'static str },

    #[error("No operable element is focused")]
    NotOperable,
}

impl AxError {
    /// Whether this error must terminate the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AxError::PermissionDenied)
    }
}

pub type Result<T> = std::result::Result<T, AxError>;
