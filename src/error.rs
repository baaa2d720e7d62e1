use std::fmt;
use thiserror::Error;

/// Why a document could not be imported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// The text is not valid JSON
    MalformedSyntax,
    /// Valid JSON, but not a diagram document
    InvalidShape,
}

impl fmt::Display for ImportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportErrorKind::MalformedSyntax => f.write_str("malformed syntax"),
            ImportErrorKind::InvalidShape => f.write_str("invalid shape"),
        }
    }
}

/// Import failure. The store is never touched when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ImportError {
    pub kind: ImportErrorKind,
    pub message: String,
}

impl ImportError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ImportErrorKind::MalformedSyntax,
            message: message.into(),
        }
    }

    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self {
            kind: ImportErrorKind::InvalidShape,
            message: message.into(),
        }
    }
}
