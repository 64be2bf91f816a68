//! Database migration command.

use clap::Args;
use console::style;

use setl_ingest::SettlementStore;

/// Arguments for the migrate command.
#[derive(Args)]
pub struct MigrateArgs {}

pub async fn run(_args: MigrateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let store = SettlementStore::connect(&config.database).await?;
    store.run_migrations().await?;

    println!("{} Migrations applied", style("✓").green());
    Ok(())
}
