//! Settlement field extraction module.

mod parser;
pub mod rules;

pub use parser::{LiquidacionParser, ParseOutcome, SettlementParser};
