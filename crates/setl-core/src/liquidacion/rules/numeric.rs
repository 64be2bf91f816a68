//! Locale-aware numeric parsing for Argentine settlement documents.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a locale-ambiguous numeric token (e.g. "$ 1.234,56" or
/// "1,234.56") into a decimal.
///
/// Currency symbols and whitespace are stripped. When both comma and
/// period appear, whichever comes last is the decimal point and the
/// other is a thousands separator; a lone comma is the decimal point.
/// Empty or unparseable tokens yield `None` so one malformed number
/// never aborts a document.
pub fn parse_localized_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(period)) if comma > period => {
            cleaned.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse a number from the "Datos Adicionales" block, where the
/// layout is unambiguous: periods are always thousands separators and
/// the comma is the decimal point.
pub fn parse_da_number(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_localized_amount() {
        assert_eq!(parse_localized_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_localized_amount("1234,56"), Some(dec("1234.56")));
        assert_eq!(parse_localized_amount("1234.56"), Some(dec("1234.56")));
        assert_eq!(parse_localized_amount("12,946,250.30"), Some(dec("12946250.30")));
        assert_eq!(parse_localized_amount("28.540,00"), Some(dec("28540.00")));
        assert_eq!(parse_localized_amount("1.234.567,89"), Some(dec("1234567.89")));
        assert_eq!(parse_localized_amount("$ 43397.97"), Some(dec("43397.97")));
        assert_eq!(parse_localized_amount("59,361"), Some(dec("59.361")));
    }

    #[test]
    fn test_parse_localized_amount_degrades_to_none() {
        assert_eq!(parse_localized_amount(""), None);
        assert_eq!(parse_localized_amount("$ "), None);
        assert_eq!(parse_localized_amount("N/A"), None);
        assert_eq!(parse_localized_amount("..,,"), None);
    }

    #[test]
    fn test_parse_da_number() {
        assert_eq!(parse_da_number("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_da_number("-2.500,00"), Some(dec("-2500.00")));
        assert_eq!(parse_da_number("218"), Some(dec("218")));
        assert_eq!(parse_da_number(""), None);
    }
}
