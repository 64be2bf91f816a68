//! Single-document processing command.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use setl_core::liquidacion::{LiquidacionParser, SettlementParser};
use setl_ingest::{PdfTextExtractor, TextExtractor};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.pdf, or already-extracted .txt)
    input: PathBuf,

    /// Write the parsed settlement JSON to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(&args.input)?;
            PdfTextExtractor.extract_text(&data)?
        }
        _ => fs::read_to_string(&args.input)?,
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text extracted from {}", args.input.display());
    }

    let outcome = LiquidacionParser::new().parse(&text);

    for warning in &outcome.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let json = serde_json::to_string_pretty(&outcome.settlement)?;
    match args.output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{} Parsed {} in {}ms -> {}",
                style("✓").green(),
                args.input.display(),
                outcome.processing_time_ms,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
