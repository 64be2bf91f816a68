//! Operation-totals extraction: mass, amounts, VAT, net payable.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

use super::numeric::parse_localized_amount;
use super::patterns::{
    IMPORTE_NETO, IVA_RG, OPERACION, PAGO_CONDICIONES, TOTAL_DEDUCCIONES, TOTAL_PERCEPCIONES,
};
use super::{run_rules, Converter, FieldRule};

/// Fixed VAT rate for grain settlements. Constant by regulation, not
/// extracted from the document.
pub fn iva_alicuota() -> Decimal {
    Decimal::new(105, 1)
}

/// Monetary and mass totals of the operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationTotals {
    pub cantidad_kg: Option<Decimal>,
    pub precio_kg: Option<Decimal>,
    pub subtotal: Option<Decimal>,
    pub iva_importe: Option<Decimal>,
    pub total_operacion: Option<Decimal>,
    pub total_deducciones: Option<Decimal>,
    pub total_percepciones: Option<Decimal>,
    pub iva_rg: Option<Decimal>,
    pub importe_neto: Option<Decimal>,
    pub pago_condiciones: Option<Decimal>,
}

lazy_static! {
    static ref RULES: [FieldRule; 5] = [
        FieldRule {
            name: "total_deducciones",
            locator: &TOTAL_DEDUCCIONES,
            converter: Converter::Amount,
        },
        FieldRule {
            name: "total_percepciones",
            locator: &TOTAL_PERCEPCIONES,
            converter: Converter::Amount,
        },
        FieldRule {
            name: "iva_rg",
            locator: &IVA_RG,
            converter: Converter::Amount,
        },
        FieldRule {
            name: "importe_neto",
            locator: &IMPORTE_NETO,
            converter: Converter::Amount,
        },
        FieldRule {
            name: "pago_condiciones",
            locator: &PAGO_CONDICIONES,
            converter: Converter::Amount,
        },
    ];
}

/// Extract the operation totals.
///
/// The main figures share one collapsed line in the source layout,
/// e.g. `59361 Kg$218.09$12946250.3010.5$1359356.28$14305606.58`;
/// the remaining figures each have their own anchor.
pub fn extract_totals(text: &str) -> OperationTotals {
    let fields = run_rules(&RULES[..], text);
    let amount = |name: &str| fields.get(name).and_then(|v| v.as_amount());

    let mut totals = OperationTotals {
        total_deducciones: amount("total_deducciones"),
        total_percepciones: amount("total_percepciones"),
        iva_rg: amount("iva_rg"),
        importe_neto: amount("importe_neto"),
        pago_condiciones: amount("pago_condiciones"),
        ..OperationTotals::default()
    };

    if let Some(caps) = OPERACION.captures(text) {
        totals.cantidad_kg = parse_localized_amount(&caps[1]);
        totals.precio_kg = parse_localized_amount(&caps[2]);
        totals.subtotal = parse_localized_amount(&caps[3]);
        totals.iva_importe = parse_localized_amount(&caps[4]);
        totals.total_operacion = parse_localized_amount(&caps[5]);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLE: &str = "59361 Kg$218.09$12946250.3010.5$1359356.28$14305606.58\n\
        $ 0.00Total Deducciones:\n\
        Total Percepciones:$ 0.00\n\
        IVA RG 4310/2018:\n$ 1,359,356.28\n\
        Importe Neto a Pagar:\n$ 14,305,606.58\n\
        Pago según condiciones:$ 12,946,250.30\n";

    #[test]
    fn test_extract_totals() {
        let totals = extract_totals(SAMPLE);

        assert_eq!(totals.cantidad_kg, Some(dec("59361")));
        assert_eq!(totals.precio_kg, Some(dec("218.09")));
        assert_eq!(totals.subtotal, Some(dec("12946250.30")));
        assert_eq!(totals.iva_importe, Some(dec("1359356.28")));
        assert_eq!(totals.total_operacion, Some(dec("14305606.58")));
        assert_eq!(totals.total_deducciones, Some(dec("0.00")));
        assert_eq!(totals.total_percepciones, Some(dec("0.00")));
        assert_eq!(totals.iva_rg, Some(dec("1359356.28")));
        assert_eq!(totals.importe_neto, Some(dec("14305606.58")));
        assert_eq!(totals.pago_condiciones, Some(dec("12946250.30")));
    }

    #[test]
    fn test_missing_anchors_yield_none() {
        let totals = extract_totals("nothing to see");
        assert_eq!(totals, OperationTotals::default());
    }

    #[test]
    fn test_iva_alicuota_constant() {
        assert_eq!(iva_alicuota(), dec("10.5"));
    }
}
