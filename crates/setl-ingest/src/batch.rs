//! Batch coordinator: per-document isolation over the extraction and
//! persistence pipeline.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};

use setl_core::liquidacion::{LiquidacionParser, SettlementParser};

use crate::error::IngestError;
use crate::store::SettlementWriter;

/// One input document for a batch run.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Display name, echoed in the per-item result.
    pub filename: String,
    /// Raw document bytes.
    pub data: Vec<u8>,
    /// Back-reference to the source artifact, when the bytes came
    /// from object storage.
    pub source_key: Option<String>,
}

impl DocumentInput {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
            source_key: None,
        }
    }

    pub fn with_source_key(mut self, key: impl Into<String>) -> Self {
        self.source_key = Some(key.into());
        self
    }
}

/// External collaborator turning document bytes into text. The
/// pipeline proper starts at the text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, data: &[u8]) -> Result<String, IngestError>;
}

/// PDF text extraction via `pdf-extract`.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String, IngestError> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| IngestError::TextExtraction(e.to_string()))
    }
}

/// Per-document result, in wire format.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grano: Option<String>,
    // Upstream consumers expect a JSON number here, not rust_decimal's
    // default string encoding.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cantidad: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctgs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentOutcome {
    fn failure(filename: &str, error: String) -> Self {
        Self {
            filename: filename.to_string(),
            success: false,
            coe: None,
            grano: None,
            cantidad: None,
            ctgs: None,
            error: Some(error),
        }
    }
}

/// Aggregate counts for a direct batch submission.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub procesados: usize,
    pub errores: usize,
}

/// Report for a direct batch submission.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub success: bool,
    pub resumen: BatchSummary,
    pub resultados: Vec<DocumentOutcome>,
}

/// Report for storage-event-triggered ingestion. Carries no summary
/// wrapper; the asymmetry with [`BatchReport`] mirrors the upstream
/// event contract.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectReport {
    pub success: bool,
    pub resultados: Vec<DocumentOutcome>,
}

/// Processes a batch of settlement documents, one at a time, each
/// isolated: extraction, assembly and persistence failures are
/// recorded on the failing item and never affect its siblings.
pub struct BatchCoordinator<S, E> {
    store: S,
    extractor: E,
    parser: LiquidacionParser,
    document_timeout: Duration,
}

impl<S, E> BatchCoordinator<S, E>
where
    S: SettlementWriter,
    E: TextExtractor,
{
    pub fn new(store: S, extractor: E, document_timeout: Duration) -> Self {
        Self {
            store,
            extractor,
            parser: LiquidacionParser::new(),
            document_timeout,
        }
    }

    /// Process a directly-submitted batch.
    ///
    /// An empty batch is a structural error and is rejected before
    /// any document is touched. Result order matches input order.
    pub async fn run(&self, documents: &[DocumentInput]) -> Result<BatchReport, IngestError> {
        if documents.is_empty() {
            return Err(IngestError::EmptyBatch);
        }

        let resultados = self.process_all(documents).await;
        let procesados = resultados.iter().filter(|r| r.success).count();
        let errores = resultados.len() - procesados;

        info!(
            total = documents.len(),
            procesados, errores, "Batch completed"
        );

        Ok(BatchReport {
            success: true,
            resumen: BatchSummary {
                total: documents.len(),
                procesados,
                errores,
            },
            resultados,
        })
    }

    /// Process storage-event documents. No summary wrapper and no
    /// empty-batch rejection: an event with zero usable records just
    /// yields an empty result list.
    pub async fn run_objects(&self, documents: &[DocumentInput]) -> ObjectReport {
        ObjectReport {
            success: true,
            resultados: self.process_all(documents).await,
        }
    }

    async fn process_all(&self, documents: &[DocumentInput]) -> Vec<DocumentOutcome> {
        let mut resultados = Vec::with_capacity(documents.len());
        for doc in documents {
            resultados.push(self.process_document(doc).await);
        }
        resultados
    }

    /// Process one document, bounded by the per-document deadline. A
    /// timeout fails only this document.
    async fn process_document(&self, doc: &DocumentInput) -> DocumentOutcome {
        match tokio::time::timeout(self.document_timeout, self.ingest_document(doc)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!(filename = %doc.filename, error = %e, "Document failed");
                DocumentOutcome::failure(&doc.filename, e.to_string())
            }
            Err(_) => {
                let e = IngestError::Timeout {
                    secs: self.document_timeout.as_secs(),
                };
                error!(filename = %doc.filename, error = %e, "Document failed");
                DocumentOutcome::failure(&doc.filename, e.to_string())
            }
        }
    }

    async fn ingest_document(&self, doc: &DocumentInput) -> Result<DocumentOutcome, IngestError> {
        let text = self.extractor.extract_text(&doc.data)?;
        let outcome = self.parser.parse(&text);

        for warning in &outcome.warnings {
            warn!(filename = %doc.filename, "{}", warning);
        }

        let settlement = outcome.settlement;
        self.store
            .persist(&settlement, doc.source_key.as_deref())
            .await?;

        Ok(DocumentOutcome {
            filename: doc.filename.clone(),
            success: true,
            coe: settlement.coe.clone(),
            grano: settlement.grano_tipo.clone(),
            cantidad: settlement.cantidad_kg,
            ctgs: Some(settlement.ctgs.len()),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{PersistedSettlement, SettlementWriter};
    use async_trait::async_trait;
    use setl_core::models::settlement::Settlement;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Records persisted settlements instead of touching a database.
    #[derive(Default)]
    struct FakeStore {
        persisted: Mutex<Vec<Option<String>>>,
        fail_on_coe: Option<String>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl SettlementWriter for FakeStore {
        async fn persist(
            &self,
            settlement: &Settlement,
            _source_key: Option<&str>,
        ) -> Result<PersistedSettlement, IngestError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_on_coe.is_some() && settlement.coe == self.fail_on_coe {
                return Err(IngestError::TextExtraction("boom".to_string()));
            }
            self.persisted.lock().unwrap().push(settlement.coe.clone());
            Ok(PersistedSettlement {
                id: Uuid::new_v4(),
                coe: settlement.coe.clone(),
            })
        }
    }

    /// Treats the document bytes as UTF-8 text.
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract_text(&self, data: &[u8]) -> Result<String, IngestError> {
            String::from_utf8(data.to_vec())
                .map_err(|e| IngestError::TextExtraction(e.to_string()))
        }
    }

    fn doc(filename: &str, coe: &str) -> DocumentInput {
        DocumentInput::new(filename, format!("C.O.E.: {}\n", coe).into_bytes())
    }

    fn coordinator(store: FakeStore) -> BatchCoordinator<FakeStore, PlainTextExtractor> {
        BatchCoordinator::new(store, PlainTextExtractor, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected_up_front() {
        let coordinator = coordinator(FakeStore::default());
        let result = coordinator.run(&[]).await;
        assert!(matches!(result, Err(IngestError::EmptyBatch)));
    }

    #[tokio::test]
    async fn test_batch_isolation_preserves_order_and_counts() {
        let coordinator = coordinator(FakeStore::default());
        let documents = vec![
            doc("a.pdf", "111"),
            // not valid UTF-8: text extraction fails for this one only
            DocumentInput::new("b.pdf", vec![0xff, 0xfe, 0xfd]),
            doc("c.pdf", "333"),
        ];

        let report = coordinator.run(&documents).await.unwrap();

        assert_eq!(report.resumen.total, 3);
        assert_eq!(report.resumen.procesados, 2);
        assert_eq!(report.resumen.errores, 1);

        assert_eq!(report.resultados[0].filename, "a.pdf");
        assert!(report.resultados[0].success);
        assert_eq!(report.resultados[0].coe.as_deref(), Some("111"));
        assert_eq!(report.resultados[1].filename, "b.pdf");
        assert!(!report.resultados[1].success);
        assert!(report.resultados[1].error.is_some());
        assert_eq!(report.resultados[2].filename, "c.pdf");
        assert!(report.resultados[2].success);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_scoped_to_one_document() {
        let store = FakeStore {
            fail_on_coe: Some("222".to_string()),
            ..FakeStore::default()
        };
        let coordinator = coordinator(store);
        let documents = vec![doc("a.pdf", "111"), doc("b.pdf", "222"), doc("c.pdf", "333")];

        let report = coordinator.run(&documents).await.unwrap();

        assert_eq!(report.resumen.procesados, 2);
        assert!(!report.resultados[1].success);
        let persisted = coordinator.store.persisted.lock().unwrap();
        assert_eq!(*persisted, vec![Some("111".to_string()), Some("333".to_string())]);
    }

    #[tokio::test]
    async fn test_timeout_fails_only_the_slow_document() {
        let store = FakeStore {
            delay: Some(Duration::from_millis(50)),
            ..FakeStore::default()
        };
        let coordinator = BatchCoordinator::new(store, PlainTextExtractor, Duration::from_millis(5));
        let report = coordinator.run(&[doc("a.pdf", "111")]).await.unwrap();

        assert_eq!(report.resumen.errores, 1);
        assert!(report.resultados[0]
            .error
            .as_deref()
            .unwrap()
            .contains("timed out"));
    }

    #[tokio::test]
    async fn test_object_mode_has_no_summary_and_accepts_empty() {
        let coordinator = coordinator(FakeStore::default());
        let report = coordinator.run_objects(&[]).await;
        assert!(report.success);
        assert!(report.resultados.is_empty());

        let docs = [doc("a.pdf", "111").with_source_key("inbox/a.pdf")];
        let report = coordinator.run_objects(&docs).await;
        assert_eq!(report.resultados.len(), 1);
        assert!(report.resultados[0].success);
    }

    #[test]
    fn test_success_wire_shape() {
        let outcome = DocumentOutcome {
            filename: "a.pdf".to_string(),
            success: true,
            coe: Some("331000123".to_string()),
            grano: Some("11 - CEBADA FORRAJERA".to_string()),
            cantidad: Some(Decimal::new(59361, 0)),
            ctgs: Some(2),
            error: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filename": "a.pdf",
                "success": true,
                "coe": "331000123",
                "grano": "11 - CEBADA FORRAJERA",
                "cantidad": 59361.0,
                "ctgs": 2
            })
        );
    }
}
