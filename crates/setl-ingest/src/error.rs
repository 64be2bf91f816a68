//! Error types for the ingestion layer.

use thiserror::Error;

/// Errors raised while ingesting settlement documents.
///
/// Per-document errors (text extraction, timeout, persistence) fail
/// only the document that raised them; `EmptyBatch` rejects the whole
/// invocation before any document is processed.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Text could not be extracted from the document bytes.
    #[error("text extraction failed: {0}")]
    TextExtraction(String),

    /// A single document exceeded its processing deadline.
    #[error("document processing timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Database error from the reconciliation store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The batch payload itself is invalid.
    #[error("empty batch: no documents to process")]
    EmptyBatch,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
