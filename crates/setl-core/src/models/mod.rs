//! Data models for settlements and pipeline configuration.

pub mod config;
pub mod settlement;
