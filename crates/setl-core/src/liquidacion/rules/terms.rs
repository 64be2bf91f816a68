//! Contract-terms extraction: grain, grade, price, freight, port.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use rust_decimal::Decimal;

use super::numeric::parse_localized_amount;
use super::patterns::{FECHA_CONTRATO, GRADO, GRANO, PRECIO_GRADO_FLETE, PUERTO};
use super::{clean, run_rules, Converter, FieldRule};

/// Contract terms of a settlement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Terms {
    pub grano_codigo: Option<String>,
    pub grano_tipo: Option<String>,
    pub grado: Option<String>,
    pub precio_tn: Option<Decimal>,
    pub flete_tn: Option<Decimal>,
    pub puerto: Option<String>,
    pub fecha_contrato: Option<NaiveDate>,
}

lazy_static! {
    static ref RULES: [FieldRule; 2] = [
        FieldRule {
            name: "puerto",
            locator: &PUERTO,
            converter: Converter::Text,
        },
        FieldRule {
            name: "fecha_contrato",
            locator: &FECHA_CONTRATO,
            converter: Converter::Date,
        },
    ];
}

/// Extract the contract terms.
///
/// The grain is recovered from a compound pattern pairing its
/// two-digit code with a whitelisted grain name. Price, grade and
/// freight share one collapsed line in the source layout, e.g.
/// `$ 265872.42G211 - CEBADA FORRAJERA$ 43397.97`.
pub fn extract_terms(text: &str) -> Terms {
    let fields = run_rules(&RULES[..], text);

    let (grano_codigo, grano_tipo) = match GRANO.captures(text) {
        Some(caps) => (Some(caps[1].to_string()), Some(clean(&caps[0]))),
        None => (None, None),
    };

    let (precio_tn, flete_tn) = match PRECIO_GRADO_FLETE.captures(text) {
        Some(caps) => (
            parse_localized_amount(&caps[1]),
            parse_localized_amount(&caps[3]),
        ),
        None => (None, None),
    };

    Terms {
        grano_codigo,
        grano_tipo,
        grado: GRADO.captures(text).map(|c| c[1].to_string()),
        precio_tn,
        flete_tn,
        puerto: fields.get("puerto").and_then(|v| v.as_text()).map(String::from),
        fecha_contrato: fields.get("fecha_contrato").and_then(|v| v.as_date()),
    }
}
