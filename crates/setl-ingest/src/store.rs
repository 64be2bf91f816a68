//! Reconciliation store: transactional, idempotent settlement
//! persistence over a pooled Postgres connection.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};
use uuid::Uuid;

use setl_core::models::config::DatabaseConfig;
use setl_core::models::settlement::{Settlement, SettlementStatus};

use crate::error::IngestError;

/// Identity of a persisted settlement row.
#[derive(Debug, Clone)]
pub struct PersistedSettlement {
    pub id: Uuid,
    pub coe: Option<String>,
}

/// Write seam for the batch coordinator. The production
/// implementation is [`SettlementStore`]; tests substitute a fake.
#[async_trait]
pub trait SettlementWriter: Send + Sync {
    /// Persist a settlement and its CTG entries in one atomic unit.
    async fn persist(
        &self,
        settlement: &Settlement,
        source_key: Option<&str>,
    ) -> Result<PersistedSettlement, IngestError>;
}

/// Database connection pool wrapper.
///
/// Constructed once per process and passed by reference into the
/// pipeline; the pool is reused across batch invocations.
#[derive(Clone)]
pub struct SettlementStore {
    pool: PgPool,
}

impl SettlementStore {
    /// Create a new store from database configuration. The
    /// `DATABASE_URL` environment variable overrides the configured
    /// URL.
    #[instrument(skip(config))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, IngestError> {
        let url = config
            .resolve_url()
            .ok_or_else(|| IngestError::Config("no database URL configured".to_string()))?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&url)
            .await?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), IngestError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Check database health.
    pub async fn health_check(&self) -> Result<(), IngestError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SettlementWriter for SettlementStore {
    /// Upsert one settlement and its CTG entries inside a single
    /// transaction.
    ///
    /// On a COE conflict only the mutable computed fields are
    /// refreshed (mass and amount totals, payment terms, additional
    /// data, source key, status); parties, grain and contract terms
    /// are set on first ingestion and never overwritten. Concurrent
    /// ingestion of the same COE serializes through the database's
    /// conflict resolution.
    #[instrument(skip(self, settlement), fields(coe = settlement.coe.as_deref().unwrap_or("<none>")))]
    async fn persist(
        &self,
        settlement: &Settlement,
        source_key: Option<&str>,
    ) -> Result<PersistedSettlement, IngestError> {
        let now = Utc::now();
        let fecha = settlement.fecha.unwrap_or_else(|| now.date_naive());
        let datos_adicionales = serde_json::to_value(&settlement.datos_adicionales)
            .unwrap_or_else(|_| serde_json::json!({}));

        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO settlements (
                id, settlement_number, company_id, settlement_date,
                grain_type, base_price_per_ton,
                total_gross_kg, total_net_kg, total_waste_kg,
                gross_amount, commercial_discount, commission_amount,
                paritarias_amount, freight_amount, net_amount,
                status,
                coe, coe_original, tipo_operacion, lugar,
                comprador_cuit, comprador_razon_social,
                vendedor_cuit, vendedor_razon_social,
                grano_codigo, grano_tipo, grado,
                flete_tn, puerto, fecha_contrato,
                pago_condiciones, datos_adicionales,
                source_key,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22,
                $23, $24, $25, $26, $27, $28, $29, $30, $31, $32,
                $33, $34, $35
            )
            ON CONFLICT (coe) DO UPDATE SET
                total_gross_kg    = EXCLUDED.total_gross_kg,
                total_net_kg      = EXCLUDED.total_net_kg,
                gross_amount      = EXCLUDED.gross_amount,
                freight_amount    = EXCLUDED.freight_amount,
                net_amount        = EXCLUDED.net_amount,
                pago_condiciones  = EXCLUDED.pago_condiciones,
                datos_adicionales = EXCLUDED.datos_adicionales,
                source_key        = EXCLUDED.source_key,
                status            = EXCLUDED.status,
                updated_at        = EXCLUDED.updated_at
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(settlement.coe.as_deref())
        .bind(settlement.vendedor_cuit.as_deref())
        .bind(fecha)
        .bind(settlement.grano_tipo.as_deref().unwrap_or("desconocido"))
        .bind(settlement.precio_tn.unwrap_or(Decimal::ZERO))
        .bind(settlement.cantidad_kg.unwrap_or(Decimal::ZERO))
        .bind(settlement.cantidad_kg.unwrap_or(Decimal::ZERO))
        .bind(Decimal::ZERO)
        .bind(settlement.subtotal.unwrap_or(Decimal::ZERO))
        .bind(Decimal::ZERO)
        .bind(Decimal::ZERO)
        .bind(Decimal::ZERO)
        .bind(settlement.flete_tn.unwrap_or(Decimal::ZERO))
        .bind(settlement.pago_condiciones.unwrap_or(Decimal::ZERO))
        .bind(SettlementStatus::Procesada.as_str())
        .bind(settlement.coe.as_deref())
        .bind(settlement.coe_original.as_deref())
        .bind(settlement.tipo_operacion.as_str())
        .bind(settlement.lugar.as_deref())
        .bind(settlement.comprador_cuit.as_deref())
        .bind(settlement.comprador_razon_social.as_deref())
        .bind(settlement.vendedor_cuit.as_deref())
        .bind(settlement.vendedor_razon_social.as_deref())
        .bind(settlement.grano_codigo.as_deref())
        .bind(settlement.grano_tipo.as_deref())
        .bind(settlement.grado.as_deref())
        .bind(settlement.flete_tn)
        .bind(settlement.puerto.as_deref())
        .bind(settlement.fecha_contrato)
        .bind(settlement.pago_condiciones)
        .bind(datos_adicionales)
        .bind(source_key)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for ctg in &settlement.ctgs {
            sqlx::query(
                r#"
                INSERT INTO ctg_entries (
                    id, settlement_id, ctg_number,
                    nro_comprobante, grado, factor,
                    contenido_proteico, gross_kg, procedencia,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT (nro_comprobante) DO UPDATE SET
                    factor   = EXCLUDED.factor,
                    gross_kg = EXCLUDED.gross_kg,
                    grado    = EXCLUDED.grado
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(&ctg.nro_comprobante)
            .bind(&ctg.nro_comprobante)
            .bind(ctg.grado.as_deref())
            .bind(ctg.factor)
            .bind(ctg.contenido_proteico)
            .bind(ctg.peso_kg)
            .bind(ctg.procedencia.as_deref())
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(settlement_id = %id, ctgs = settlement.ctgs.len(), "Settlement persisted");

        Ok(PersistedSettlement {
            id,
            coe: settlement.coe.clone(),
        })
    }
}
