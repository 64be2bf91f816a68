//! "Datos Adicionales" block extraction: signed price adjustments.

use rust_decimal::Decimal;

use super::numeric::parse_da_number;
use super::patterns::{
    DATOS_ADICIONALES, DA_CONTRATO, DA_DESC_COMERCIAL, DA_DESC_COMERCIAL_SPLIT, DA_FACTOR,
    DA_FLETE, DA_GRADO, DA_PRECIO, DA_PX_NETO,
};
use crate::models::settlement::AdditionalData;

/// Extract the trailing adjustments block.
///
/// Only the segment between the "Datos Adicionales:" anchor and the
/// buyer-signature anchor (or end of text) is scanned; the same
/// labels elsewhere in the document mean other things. A document
/// without the block yields the empty default.
pub fn extract_additional_data(text: &str) -> AdditionalData {
    let Some(caps) = DATOS_ADICIONALES.captures(text) else {
        return AdditionalData::default();
    };
    let block = &caps[1];

    let number = |re: &regex::Regex| re.captures(block).and_then(|c| parse_da_number(&c[1]));

    AdditionalData {
        contrato: DA_CONTRATO.captures(block).map(|c| c[1].to_string()),
        precio_base_tn: number(&DA_PRECIO),
        descuento_grado: number(&DA_GRADO),
        descuento_factor: number(&DA_FACTOR),
        descuento_comercial: extract_desc_comercial(block),
        flete_neto: number(&DA_FLETE),
        precio_neto_tn: number(&DA_PX_NETO),
    }
}

/// The commercial discount appears either inline ("Desc.Comercial:
/// -1.234,56") or with the sign alone at the end of the line and the
/// amount on the next one. In the split layout the bare negative
/// marker coerces the amount negative.
fn extract_desc_comercial(block: &str) -> Option<Decimal> {
    let caps = DA_DESC_COMERCIAL_SPLIT
        .captures(block)
        .or_else(|| DA_DESC_COMERCIAL.captures(block))?;
    let value = parse_da_number(&caps[1])?;

    if block.contains("Desc.Comercial: -") {
        Some(-value.abs())
    } else {
        Some(value)
    }
}
