//! Settlement assembler: merges the independent extractors into one
//! structured record.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::settlement::Settlement;

use super::rules::{
    additional::extract_additional_data,
    ctg::extract_ctgs,
    header::extract_header,
    parties::extract_parties,
    terms::extract_terms,
    totals::{extract_totals, iva_alicuota},
};

/// Result of parsing one settlement document.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Assembled settlement record.
    pub settlement: Settlement,
    /// Extraction warnings: fields a complete document would have.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for settlement parsing.
pub trait SettlementParser {
    /// Parse a settlement from extracted document text.
    fn parse(&self, text: &str) -> ParseOutcome;
}

/// Anchor-based parser for liquidación documents.
///
/// Each extractor is a pure function over the full text; none
/// depends on another's output, so a missing section degrades to
/// `None` fields without affecting the rest.
#[derive(Debug, Clone, Default)]
pub struct LiquidacionParser;

impl LiquidacionParser {
    pub fn new() -> Self {
        Self
    }
}

impl SettlementParser for LiquidacionParser {
    fn parse(&self, text: &str) -> ParseOutcome {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing settlement from {} characters of text", text.len());

        let header = extract_header(text);
        let parties = extract_parties(text);
        let terms = extract_terms(text);
        let totals = extract_totals(text);
        let ctgs = extract_ctgs(text);
        let datos_adicionales = extract_additional_data(text);

        if header.coe.is_none() {
            warnings.push("Could not extract operation code (C.O.E.)".to_string());
        }
        if parties.vendedor_cuit.is_none() {
            warnings.push("Could not extract seller CUIT".to_string());
        }
        if ctgs.is_empty() {
            warnings.push("No CTG entries found in either layout".to_string());
        }

        let settlement = Settlement {
            coe: header.coe,
            coe_original: header.coe_original,
            tipo_operacion: header.tipo_operacion,
            fecha: header.fecha,
            lugar: header.lugar,
            comprador_cuit: parties.comprador_cuit,
            comprador_razon_social: parties.comprador_razon_social,
            vendedor_cuit: parties.vendedor_cuit,
            vendedor_razon_social: parties.vendedor_razon_social,
            grano_codigo: terms.grano_codigo,
            grano_tipo: terms.grano_tipo,
            grado: terms.grado,
            precio_tn: terms.precio_tn,
            flete_tn: terms.flete_tn,
            puerto: terms.puerto,
            fecha_contrato: terms.fecha_contrato,
            cantidad_kg: totals.cantidad_kg,
            precio_kg: totals.precio_kg,
            subtotal: totals.subtotal,
            iva_alicuota: iva_alicuota(),
            iva_importe: totals.iva_importe,
            total_operacion: totals.total_operacion,
            total_deducciones: totals.total_deducciones,
            total_percepciones: totals.total_percepciones,
            iva_rg: totals.iva_rg,
            importe_neto: totals.importe_neto,
            pago_condiciones: totals.pago_condiciones,
            datos_adicionales,
            ctgs,
            status: Default::default(),
        };

        debug!(
            coe = settlement.coe.as_deref().unwrap_or("<none>"),
            ctgs = settlement.ctgs.len(),
            warnings = warnings.len(),
            "Settlement assembled"
        );

        ParseOutcome {
            settlement,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
