//! Settlement data models for Argentine grain liquidaciones.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed grain-settlement document.
///
/// Every field is optional: extraction degrades per field, and the
/// persistence layer decides what to default. The COE (operation
/// code) is the natural deduplication key when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settlement {
    /// Operation code (C.O.E.) - unique business identifier.
    pub coe: Option<String>,

    /// Original operation code, set when the document amends another.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coe_original: Option<String>,

    /// Operation classification.
    pub tipo_operacion: OperationType,

    /// Settlement date from the dated header line.
    pub fecha: Option<NaiveDate>,

    /// Place of issue from the dated header line.
    pub lugar: Option<String>,

    /// Buyer tax id (CUIT).
    pub comprador_cuit: Option<String>,

    /// Buyer legal name.
    pub comprador_razon_social: Option<String>,

    /// Seller tax id (CUIT).
    pub vendedor_cuit: Option<String>,

    /// Seller legal name.
    pub vendedor_razon_social: Option<String>,

    /// Two-digit grain code.
    pub grano_codigo: Option<String>,

    /// Grain description, e.g. "10 - CEBADA FORRAJERA".
    pub grano_tipo: Option<String>,

    /// Grade token (G1, G2, FG).
    pub grado: Option<String>,

    /// Contract unit price per ton.
    pub precio_tn: Option<Decimal>,

    /// Freight per ton.
    pub flete_tn: Option<Decimal>,

    /// Delivery port.
    pub puerto: Option<String>,

    /// Contract date.
    pub fecha_contrato: Option<NaiveDate>,

    /// Gross mass in kilograms.
    pub cantidad_kg: Option<Decimal>,

    /// Unit price per kilogram.
    pub precio_kg: Option<Decimal>,

    /// Operation subtotal before VAT.
    pub subtotal: Option<Decimal>,

    /// VAT rate. Fixed at 10.5 for grain settlements, never extracted.
    pub iva_alicuota: Decimal,

    /// VAT amount.
    pub iva_importe: Option<Decimal>,

    /// Total operation amount.
    pub total_operacion: Option<Decimal>,

    /// Total deductions.
    pub total_deducciones: Option<Decimal>,

    /// Total withholdings (percepciones).
    pub total_percepciones: Option<Decimal>,

    /// VAT-regime amount (IVA RG 4310/2018).
    pub iva_rg: Option<Decimal>,

    /// Net amount payable.
    pub importe_neto: Option<Decimal>,

    /// "Payment per contract terms" amount.
    pub pago_condiciones: Option<Decimal>,

    /// Signed adjustments from the trailing "Datos Adicionales" block.
    pub datos_adicionales: AdditionalData,

    /// Delivery receipts (CTGs) referenced by the settlement.
    pub ctgs: Vec<CtgEntry>,

    /// Processing status.
    pub status: SettlementStatus,
}

/// One delivery receipt (CTG) under a settlement.
///
/// The receipt number is globally unique and drives upsert semantics.
/// Entries recovered through the fallback layout carry only a number
/// and a weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtgEntry {
    /// Receipt number, globally unique.
    pub nro_comprobante: String,

    /// Grade token (G1, G2, G3, FG).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grado: Option<String>,

    /// Protein content factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contenido_proteico: Option<Decimal>,

    /// Origin locality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedencia: Option<String>,

    /// Grade-based price-adjustment factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<Decimal>,

    /// Gross weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<Decimal>,
}

/// Signed adjustments from the "Datos Adicionales" block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalData {
    /// Contract number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrato: Option<String>,

    /// Base price per ton.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_base_tn: Option<Decimal>,

    /// Grade discount (signed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descuento_grado: Option<Decimal>,

    /// Factor discount (signed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descuento_factor: Option<Decimal>,

    /// Commercial discount. Negative when the document carries an
    /// explicit negative marker before the amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descuento_comercial: Option<Decimal>,

    /// Net freight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flete_neto: Option<Decimal>,

    /// Net price per ton.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_neto_tn: Option<Decimal>,
}

impl AdditionalData {
    /// Check whether any adjustment was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Classification of a settlement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Primary sale (tipo de operación 1).
    Primaria,
    /// Unified adjustment of a prior settlement.
    Ajuste,
    /// Anything else.
    Otro,
}

impl Default for OperationType {
    fn default() -> Self {
        Self::Otro
    }
}

impl OperationType {
    /// Stable textual form used in persisted rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primaria => "primaria",
            Self::Ajuste => "ajuste",
            Self::Otro => "otro",
        }
    }
}

/// Processing status of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Parsed but not yet persisted.
    Pendiente,
    /// Persisted by the ingestion pipeline.
    Procesada,
}

impl Default for SettlementStatus {
    fn default() -> Self {
        Self::Pendiente
    }
}

impl SettlementStatus {
    /// Stable textual form used in persisted rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::Procesada => "procesada",
        }
    }
}
