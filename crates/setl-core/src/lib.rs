//! Core library for grain-settlement ("liquidación") document parsing.
//!
//! This crate provides:
//! - Text normalization and locale-aware numeric parsing
//! - Anchor-based field extraction over extracted document text
//! - CTG (delivery receipt) line-item recovery with layout fallback
//! - Settlement data models shared with the persistence layer

pub mod error;
pub mod liquidacion;
pub mod models;

pub use error::{Result, SetlError};
pub use liquidacion::{LiquidacionParser, ParseOutcome, SettlementParser};
pub use models::config::SetlConfig;
pub use models::settlement::{
    AdditionalData, CtgEntry, OperationType, Settlement, SettlementStatus,
};
