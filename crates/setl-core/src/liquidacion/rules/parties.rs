//! Counter-party extraction: buyer and seller tax ids and names.

use super::patterns::{CUIT, RAZON_SOCIAL};
use super::{clean, FieldExtractor};

/// Buyer and seller identification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parties {
    pub comprador_cuit: Option<String>,
    pub comprador_razon_social: Option<String>,
    pub vendedor_cuit: Option<String>,
    pub vendedor_razon_social: Option<String>,
}

/// Extracts all CUIT occurrences in document order.
pub struct CuitExtractor;

impl FieldExtractor for CuitExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CUIT.captures_iter(text).map(|c| c[1].to_string()).collect()
    }
}

/// Extracts all "Razón Social" occurrences in document order.
pub struct RazonSocialExtractor;

impl FieldExtractor for RazonSocialExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        RAZON_SOCIAL
            .captures_iter(text)
            .map(|c| clean(&c[1]))
            .collect()
    }
}

/// Extract the document's parties.
///
/// Layout precondition: the liquidación prints the buyer's CUIT and
/// razón social before the seller's, so the first occurrence of each
/// is assigned to the buyer and the second to the seller. When fewer
/// than two occurrences are found the missing role stays `None`
/// rather than being guessed from elsewhere in the document.
pub fn extract_parties(text: &str) -> Parties {
    let cuits = CuitExtractor.extract_all(text);
    let razones = RazonSocialExtractor.extract_all(text);

    Parties {
        comprador_cuit: cuits.first().cloned(),
        comprador_razon_social: razones.first().cloned(),
        vendedor_cuit: cuits.get(1).cloned(),
        vendedor_razon_social: razones.get(1).cloned(),
    }
}
