//! Store integration tests. These need a live Postgres and only run
//! when `DATABASE_URL` is set; otherwise they are skipped.

use rust_decimal::Decimal;
use std::str::FromStr;

use setl_core::models::config::DatabaseConfig;
use setl_core::models::settlement::{CtgEntry, Settlement};
use setl_ingest::{SettlementStore, SettlementWriter};

async fn test_store() -> Option<SettlementStore> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping store integration test");
        return None;
    }
    let store = SettlementStore::connect(&DatabaseConfig::default())
        .await
        .expect("connect");
    store.run_migrations().await.expect("migrations");
    Some(store)
}

fn sample_settlement(coe: &str) -> Settlement {
    Settlement {
        coe: Some(coe.to_string()),
        grano_tipo: Some("11 - CEBADA FORRAJERA".to_string()),
        cantidad_kg: Some(Decimal::from_str("59361").unwrap()),
        subtotal: Some(Decimal::from_str("12946250.30").unwrap()),
        pago_condiciones: Some(Decimal::from_str("12946250.30").unwrap()),
        ctgs: vec![CtgEntry {
            nro_comprobante: format!("{}0001", coe),
            grado: Some("G2".to_string()),
            contenido_proteico: Some(Decimal::from_str("11").unwrap()),
            procedencia: Some("TRES ARROYOS".to_string()),
            factor: Some(Decimal::from_str("98.50").unwrap()),
            peso_kg: Some(Decimal::from_str("28540").unwrap()),
        }],
        ..Settlement::default()
    }
}

#[tokio::test]
async fn reingestion_is_idempotent() {
    let Some(store) = test_store().await else {
        return;
    };

    let coe = format!("t{}", uuid::Uuid::new_v4().simple());
    let settlement = sample_settlement(&coe);

    let first = store.persist(&settlement, None).await.expect("first persist");

    let mut updated = settlement.clone();
    updated.cantidad_kg = Some(Decimal::from_str("60000").unwrap());
    let second = store.persist(&updated, None).await.expect("second persist");

    // Same row identity, no duplicate settlement or CTG rows.
    assert_eq!(first.id, second.id);

    let (settlements, ctgs): (i64, i64) = {
        let s = sqlx::query_scalar("SELECT COUNT(*) FROM settlements WHERE coe = $1")
            .bind(&coe)
            .fetch_one(store.pool())
            .await
            .unwrap();
        let c = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ctg_entries WHERE nro_comprobante = $1",
        )
        .bind(format!("{}0001", coe))
        .fetch_one(store.pool())
        .await
        .unwrap();
        (s, c)
    };
    assert_eq!(settlements, 1);
    assert_eq!(ctgs, 1);

    // Mutable totals refreshed by the second ingestion.
    let gross: Decimal =
        sqlx::query_scalar("SELECT total_gross_kg FROM settlements WHERE coe = $1")
            .bind(&coe)
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(gross, Decimal::from_str("60000").unwrap());
}

#[tokio::test]
async fn failed_ctg_insert_rolls_back_the_settlement() {
    let Some(store) = test_store().await else {
        return;
    };

    let coe = format!("t{}", uuid::Uuid::new_v4().simple());
    let mut settlement = sample_settlement(&coe);
    // Second CTG overflows the NUMERIC(8,2) factor column, so the
    // insert loop fails after the settlement row was written.
    settlement.ctgs.push(CtgEntry {
        nro_comprobante: format!("{}0002", coe),
        grado: None,
        contenido_proteico: None,
        procedencia: None,
        factor: Some(Decimal::from_str("10000000").unwrap()),
        peso_kg: None,
    });

    let result = store.persist(&settlement, None).await;
    assert!(result.is_err());

    // All-or-nothing: no settlement row was left behind.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settlements WHERE coe = $1")
        .bind(&coe)
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}
