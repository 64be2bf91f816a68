//! Settlement ingestion: transactional persistence and batch
//! coordination for parsed liquidaciones.
//!
//! This crate provides:
//! - A pooled Postgres store with idempotent upsert semantics keyed
//!   on the COE and the CTG receipt number
//! - A batch coordinator that processes documents independently and
//!   aggregates a per-item report

pub mod batch;
pub mod error;
pub mod store;

pub use batch::{
    BatchCoordinator, BatchReport, BatchSummary, DocumentInput, DocumentOutcome, ObjectReport,
    PdfTextExtractor, TextExtractor,
};
pub use error::IngestError;
pub use store::{PersistedSettlement, SettlementStore, SettlementWriter};
