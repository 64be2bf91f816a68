//! Anchor regex patterns for liquidación extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Header anchors
    pub static ref COE: Regex = Regex::new(
        r"C\.O\.E\.:\s*(\d+)"
    ).unwrap();

    pub static ref COE_ORIGINAL: Regex = Regex::new(
        r"COE ORIGINAL:\s*(\d+)"
    ).unwrap();

    pub static ref AJUSTE_MARKER: Regex = Regex::new(
        r"(?i)Ajuste unificado"
    ).unwrap();

    pub static ref TIPO_PRIMARIA: Regex = Regex::new(
        r"(?i)Tipo de operaci[oó]n:\s*1"
    ).unwrap();

    // Dated header line: "02/05/2024, CIUDAD AUTONOMA..."
    pub static ref FECHA_LINEA: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4}),\s*[A-Z]"
    ).unwrap();

    pub static ref LUGAR: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4},\s*([A-Z ]+)\n"
    ).unwrap();

    // Parties (document order: buyer first, seller second)
    pub static ref CUIT: Regex = Regex::new(
        r"C\.U\.I\.T\.:\s*(\d+)"
    ).unwrap();

    pub static ref RAZON_SOCIAL: Regex = Regex::new(
        r"(?i)Raz[oó]n Social:\s*([^\n]+)"
    ).unwrap();

    // Contract terms
    pub static ref GRANO: Regex = Regex::new(
        r"(?i)(\d{2})\s*-\s*(CEBADA FORRAJERA|TRIGO PAN|TRIGO DURO|MAIZ|SOJA|SORGO|GIRASOL)"
    ).unwrap();

    // Collapsed terms line: "$ 265872.42G211 - CEBADA FORRAJERA$ 43397.97"
    // captures price, grade and freight in one pass.
    pub static ref PRECIO_GRADO_FLETE: Regex = Regex::new(
        r"\$\s*([\d.]+)(G[12]|FG)\d{2}\s*-\s*[A-Z ]+\$\s*([\d.]+)"
    ).unwrap();

    pub static ref GRADO: Regex = Regex::new(
        r"\$\s*[\d.]+(G[12]|FG)\d"
    ).unwrap();

    pub static ref PUERTO: Regex = Regex::new(
        r"(?i)Puerto\s*\n([A-Z ]+)\n"
    ).unwrap();

    pub static ref FECHA_CONTRATO: Regex = Regex::new(
        r"Fecha:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Operation totals line:
    // "59361 Kg$218.09$12946250.3010.5$1359356.28$14305606.58"
    pub static ref OPERACION: Regex = Regex::new(
        r"([\d,]+)\s*Kg\s*\$\s*([\d.]+)\s*\$\s*([\d.,]+?)\s*(?:10\.5|10,5)\s*\$\s*([\d.,]+)\s*\$\s*([\d.,]+)"
    ).unwrap();

    // "$ 0.00Total Deducciones:" - the value precedes the label
    pub static ref TOTAL_DEDUCCIONES: Regex = Regex::new(
        r"(?i)\$\s*([\d.,]+)Total Deducciones:"
    ).unwrap();

    pub static ref TOTAL_PERCEPCIONES: Regex = Regex::new(
        r"(?i)Total Percepciones:\$\s*([\d.,]+)"
    ).unwrap();

    pub static ref IVA_RG: Regex = Regex::new(
        r"(?i)IVA RG[^:]*:\s*\n\$\s*([\d.,]+)"
    ).unwrap();

    pub static ref IMPORTE_NETO: Regex = Regex::new(
        r"(?i)Importe Neto a Pagar:\s*\n\$\s*([\d.,]+)"
    ).unwrap();

    pub static ref PAGO_CONDICIONES: Regex = Regex::new(
        r"(?i)Pago seg[uú]n condiciones:\$\s*([\d.,]+)"
    ).unwrap();

    // CTG primary layout: one receipt per line with full metadata
    pub static ref CTG_LINEA: Regex = Regex::new(
        r"(\d{12})\s*(FG|G[123])\s*(\d+)\s*Localidad:\s*([^\n]+?)\s*(\d{2}\.\d{2})\s*(\d{4,6})\s*\n"
    ).unwrap();

    // CTG fallback layout: "CTG. Nro:" block up to a blank line or
    // the signature section
    pub static ref CTG_BLOQUE: Regex = Regex::new(
        r"(?is)CTG\.\s*Nro:\s*(.+?)(?:\n\n|\nFirma|\z)"
    ).unwrap();

    pub static ref CTG_PAR: Regex = Regex::new(
        r"(\d{11,14})\s*\(([\d.,]+)\)"
    ).unwrap();

    // Datos Adicionales block bounds and field anchors
    pub static ref DATOS_ADICIONALES: Regex = Regex::new(
        r"(?is)Datos Adicionales:\s*(.+?)(?:Firma Comprador|\z)"
    ).unwrap();

    pub static ref DA_CONTRATO: Regex = Regex::new(
        r"(?i)Contrato:\s*(\d+)"
    ).unwrap();

    pub static ref DA_PRECIO: Regex = Regex::new(
        r"(?i)Precio:\s*([\d.,]+)\$/TN"
    ).unwrap();

    pub static ref DA_GRADO: Regex = Regex::new(
        r"(?i)Grado:\s*(-?[\d.,]+)"
    ).unwrap();

    pub static ref DA_FACTOR: Regex = Regex::new(
        r"(?i)Factor:\s*(-?[\d.,]+)"
    ).unwrap();

    // Two layouts: amount on the line after a bare negative marker,
    // or inline (possibly signed)
    pub static ref DA_DESC_COMERCIAL_SPLIT: Regex = Regex::new(
        r"(?i)Desc\.Comercial:\s*-?\n([\d.,]+)"
    ).unwrap();

    pub static ref DA_DESC_COMERCIAL: Regex = Regex::new(
        r"(?i)Desc\.Comercial:\s*([-\d.,]+)"
    ).unwrap();

    pub static ref DA_FLETE: Regex = Regex::new(
        r"(?i)Flete:\s*(-?[\d.,]+)"
    ).unwrap();

    pub static ref DA_PX_NETO: Regex = Regex::new(
        r"(?i)Px Neto:\s*([\d.,]+)"
    ).unwrap();
}
