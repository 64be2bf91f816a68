//! Batch ingestion command for multiple settlement documents.

use std::fs;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use setl_ingest::{BatchCoordinator, DocumentInput, PdfTextExtractor, SettlementStore};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Print the full per-document JSON report
    #[arg(long)]
    report: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<_> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("documento.pdf")
            .to_string();
        debug!("Reading {}", path.display());
        documents.push(DocumentInput::new(filename, fs::read(path)?));
    }

    let store = SettlementStore::connect(&config.database).await?;
    let coordinator = BatchCoordinator::new(
        store,
        PdfTextExtractor,
        Duration::from_secs(config.batch.document_timeout_secs),
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Ingesting {} documents...", documents.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = coordinator.run(&documents).await?;

    spinner.finish_and_clear();

    // Print summary
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.resumen.total,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.resumen.procesados).green(),
        style(report.resumen.errores).red()
    );

    let failed: Vec<_> = report.resultados.iter().filter(|r| !r.success).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.filename,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if args.report {
        println!();
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
