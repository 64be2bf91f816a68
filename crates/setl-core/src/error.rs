//! Error types for the setl-core library.

use thiserror::Error;

/// Main error type for the setl library.
///
/// Field extraction itself never fails: an absent anchor or an
/// unparseable number becomes a `None` field. Errors here cover the
/// surrounding machinery (configuration, I/O) only.
#[derive(Error, Debug)]
pub enum SetlError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the setl library.
pub type Result<T> = std::result::Result<T, SetlError>;
