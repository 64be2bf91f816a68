//! Header extraction: operation code, classification, date and place.

use chrono::NaiveDate;
use lazy_static::lazy_static;

use super::patterns::{AJUSTE_MARKER, COE, COE_ORIGINAL, FECHA_LINEA, LUGAR, TIPO_PRIMARIA};
use super::{run_rules, Converter, FieldRule};
use crate::models::settlement::OperationType;

/// Header fields of a settlement document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub coe: Option<String>,
    pub coe_original: Option<String>,
    pub tipo_operacion: OperationType,
    pub fecha: Option<NaiveDate>,
    pub lugar: Option<String>,
}

lazy_static! {
    static ref RULES: [FieldRule; 4] = [
        FieldRule {
            name: "coe",
            locator: &COE,
            converter: Converter::Text,
        },
        FieldRule {
            name: "coe_original",
            locator: &COE_ORIGINAL,
            converter: Converter::Text,
        },
        FieldRule {
            name: "fecha",
            locator: &FECHA_LINEA,
            converter: Converter::Date,
        },
        FieldRule {
            name: "lugar",
            locator: &LUGAR,
            converter: Converter::Text,
        },
    ];
}

/// Classify the operation. An adjustment marker wins over the
/// explicit "tipo de operación: 1" marker.
pub fn classify_operation(text: &str) -> OperationType {
    if AJUSTE_MARKER.is_match(text) {
        OperationType::Ajuste
    } else if TIPO_PRIMARIA.is_match(text) {
        OperationType::Primaria
    } else {
        OperationType::Otro
    }
}

/// Extract the document header.
pub fn extract_header(text: &str) -> Header {
    let fields = run_rules(&RULES[..], text);

    Header {
        coe: fields.get("coe").and_then(|v| v.as_text()).map(String::from),
        coe_original: fields
            .get("coe_original")
            .and_then(|v| v.as_text())
            .map(String::from),
        tipo_operacion: classify_operation(text),
        fecha: fields.get("fecha").and_then(|v| v.as_date()),
        lugar: fields.get("lugar").and_then(|v| v.as_text()).map(String::from),
    }
}
