//! Error types for the editor core.

use miette::Diagnostic;

/// A write to the key-value store was rejected (quota, private mode, ...).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("could not store `{key}`: {message}")]
#[diagnostic(code(fotg::storage::write))]
pub struct StorageError {
    pub key: String,
    pub message: String,
}

impl StorageError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Storage(#[from] StorageError),

    /// The page supplied configuration that does not parse
    #[error("invalid editor configuration: {0}")]
    #[diagnostic(
        code(fotg::config),
        help("the `fotg-config` element must hold a JSON object")
    )]
    Config(#[from] serde_json::Error),

    /// A user-picked file could not be read as text
    #[error("could not import file: {0}")]
    #[diagnostic(code(fotg::import))]
    Import(String),
}
