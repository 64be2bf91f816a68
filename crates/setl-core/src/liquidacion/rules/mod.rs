//! Rule-based field extractors for grain-settlement documents.
//!
//! Single-anchor fields are declared as [`FieldRule`] entries (name,
//! locator, converter) and evaluated by [`run_rules`], so a new
//! document layout is a new table entry rather than new code paths.
//! Multi-occurrence extractors (parties, CTG rows) implement
//! [`FieldExtractor`] directly.

pub mod additional;
pub mod ctg;
pub mod header;
pub mod numeric;
pub mod parties;
pub mod patterns;
pub mod terms;
pub mod totals;

use std::collections::HashMap;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use numeric::parse_localized_amount;

/// Collapse all whitespace runs to single spaces and trim.
pub fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Post-processor applied to a rule's first capture group.
#[derive(Debug, Clone, Copy)]
pub enum Converter {
    /// Whitespace-normalized string.
    Text,
    /// Locale-aware decimal amount.
    Amount,
    /// `dd/mm/yyyy` date.
    Date,
}

/// A converted field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(Decimal),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// One named extraction rule: a textual anchor plus a converter.
pub struct FieldRule {
    /// Field name the extracted value is stored under.
    pub name: &'static str,
    /// Anchor pattern; the first capture group is the raw value.
    pub locator: &'static Regex,
    /// Post-processor for the captured value.
    pub converter: Converter,
}

/// Evaluate a rule table against normalized text.
///
/// An absent anchor or an unconvertible capture leaves the field out
/// of the result map; rules never fail and never observe each other.
pub fn run_rules(rules: &[FieldRule], text: &str) -> HashMap<&'static str, FieldValue> {
    let mut fields = HashMap::with_capacity(rules.len());

    for rule in rules {
        let Some(caps) = rule.locator.captures(text) else {
            continue;
        };
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        let value = match rule.converter {
            Converter::Text => {
                let cleaned = clean(raw);
                if cleaned.is_empty() {
                    None
                } else {
                    Some(FieldValue::Text(cleaned))
                }
            }
            Converter::Amount => parse_localized_amount(raw).map(FieldValue::Amount),
            Converter::Date => NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
                .ok()
                .map(FieldValue::Date),
        };

        if let Some(value) = value {
            fields.insert(rule.name, value);
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_clean() {
        assert_eq!(clean("  CIUDAD   DE\n BUENOS AIRES "), "CIUDAD DE BUENOS AIRES");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_run_rules_missing_anchor_is_not_an_error() {
        let rules = [FieldRule {
            name: "coe",
            locator: &patterns::COE,
            converter: Converter::Text,
        }];
        let fields = run_rules(&rules, "no anchors here");
        assert!(fields.is_empty());
    }

    #[test]
    fn test_run_rules_converts_per_rule() {
        let rules = [
            FieldRule {
                name: "coe",
                locator: &patterns::COE,
                converter: Converter::Text,
            },
            FieldRule {
                name: "pago_condiciones",
                locator: &patterns::PAGO_CONDICIONES,
                converter: Converter::Amount,
            },
        ];
        let text = "C.O.E.: 331000123\nPago según condiciones:$ 12,946,250.30\n";
        let fields = run_rules(&rules, text);

        assert_eq!(fields["coe"].as_text(), Some("331000123"));
        assert_eq!(
            fields["pago_condiciones"].as_amount(),
            Some(Decimal::from_str("12946250.30").unwrap())
        );
    }
}
