//! CTG line-item extraction with a two-strategy layout fallback.

use super::numeric::parse_localized_amount;
use super::patterns::{CTG_BLOQUE, CTG_LINEA, CTG_PAR};
use super::{clean, FieldExtractor};
use crate::models::settlement::CtgEntry;

/// Primary layout: one fully-described receipt per text line, e.g.
/// `123456789012 G2 11 Localidad: TRES ARROYOS 98.50 28540`.
pub struct CtgLineExtractor;

impl FieldExtractor for CtgLineExtractor {
    type Output = CtgEntry;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CTG_LINEA
            .captures_iter(text)
            .map(|caps| CtgEntry {
                nro_comprobante: caps[1].to_string(),
                grado: Some(caps[2].to_string()),
                contenido_proteico: parse_localized_amount(&caps[3]),
                procedencia: Some(clean(&caps[4])),
                factor: parse_localized_amount(&caps[5]),
                peso_kg: parse_localized_amount(&caps[6]),
            })
            .collect()
    }
}

/// Fallback layout: a "CTG. Nro:" block listing bare
/// (receipt-number, parenthesized-weight) pairs. Grade, factor,
/// protein and origin are not printed in this layout.
pub struct CtgBlockExtractor;

impl FieldExtractor for CtgBlockExtractor {
    type Output = CtgEntry;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut entries = Vec::new();

        for block in CTG_BLOQUE.captures_iter(text) {
            for pair in CTG_PAR.captures_iter(&block[1]) {
                entries.push(CtgEntry {
                    nro_comprobante: pair[1].to_string(),
                    grado: None,
                    contenido_proteico: None,
                    procedencia: None,
                    factor: None,
                    peso_kg: parse_localized_amount(&pair[2]),
                });
            }
        }

        entries
    }
}

/// Extract the settlement's delivery receipts.
///
/// The fallback layout is tried if and only if the primary layout
/// yields zero records; a document matching neither produces an
/// empty list, not an error.
pub fn extract_ctgs(text: &str) -> Vec<CtgEntry> {
    let entries = CtgLineExtractor.extract_all(text);
    if !entries.is_empty() {
        return entries;
    }
    CtgBlockExtractor.extract_all(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_primary_layout() {
        let text = "123456789012 G2 11 Localidad: TRES ARROYOS 98.50 28540\n\
                    123456789013 FG 10 Localidad: CORONEL DORREGO 87.20 30821\n";
        let ctgs = extract_ctgs(text);

        assert_eq!(ctgs.len(), 2);
        assert_eq!(ctgs[0].nro_comprobante, "123456789012");
        assert_eq!(ctgs[0].grado.as_deref(), Some("G2"));
        assert_eq!(ctgs[0].contenido_proteico, Some(dec("11")));
        assert_eq!(ctgs[0].procedencia.as_deref(), Some("TRES ARROYOS"));
        assert_eq!(ctgs[0].factor, Some(dec("98.50")));
        assert_eq!(ctgs[0].peso_kg, Some(dec("28540")));
        assert_eq!(ctgs[1].grado.as_deref(), Some("FG"));
    }

    #[test]
    fn test_fallback_only_when_primary_empty() {
        let text = "CTG. Nro: 10012345678 (28540.00) 10012345679 (30821.00)\nFirma Comprador\n";
        let ctgs = extract_ctgs(text);

        assert_eq!(ctgs.len(), 2);
        assert_eq!(ctgs[0].nro_comprobante, "10012345678");
        assert_eq!(ctgs[0].peso_kg, Some(dec("28540.00")));
        assert_eq!(ctgs[0].grado, None);
        assert_eq!(ctgs[0].factor, None);
        assert_eq!(ctgs[0].contenido_proteico, None);
        assert_eq!(ctgs[0].procedencia, None);
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let text = "123456789012 G1 12 Localidad: AZUL 99.00 41000\n\
                    CTG. Nro: 10012345678 (28540.00)\n\n";
        let ctgs = extract_ctgs(text);

        assert_eq!(ctgs.len(), 1);
        assert_eq!(ctgs[0].nro_comprobante, "123456789012");
    }

    #[test]
    fn test_neither_layout_yields_empty_list() {
        assert!(extract_ctgs("documento sin CTGs").is_empty());
    }
}
