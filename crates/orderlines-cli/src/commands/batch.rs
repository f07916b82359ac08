//! Batch command - extract line items from many documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use orderlines_core::extract::Layout;
use orderlines_core::pipeline::{extract_document_with, ExtractionResult};

use super::extract::extraction_overrides;
use super::output::{render, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input documents (.pdf, .txt)
    #[arg(required = true)]
    input: String,

    /// Output directory, one file per document
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each document
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Layout to run; repeatable
    #[arg(short = 'l', long = "layout")]
    layouts: Vec<Layout>,

    /// Run all layouts in a single pass, keeping records in document order
    #[arg(long)]
    interleaved: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for one document.
struct FileOutcome {
    path: PathBuf,
    result: ExtractionResult,
}

impl FileOutcome {
    fn error(&self) -> Option<&str> {
        if !self.result.source_unavailable {
            return None;
        }
        let message = self.result.warnings.first().map(String::as_str);
        Some(message.unwrap_or("source unavailable"))
    }

    fn count(&self, layout: Layout) -> usize {
        self.result.records.iter().filter(|r| r.layout() == layout).count()
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let extraction = extraction_overrides(&config, &args.layouts, args.interleaved, None)?;
    let dispatcher = extraction.dispatcher();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
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

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let result = extract_document_with(&path, &dispatcher, &config.pdf);
        let outcome = FileOutcome { path, result };

        if let Some(message) = outcome.error() {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", outcome.path.display(), message);
            } else {
                error!("Failed to process {}: {}", outcome.path.display(), message);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", message);
            }
        } else if let Some(output_dir) = &args.output_dir {
            write_output(output_dir, &outcome, args.format)?;
        }

        outcomes.push(outcome);
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.error().is_some()).collect();
    let total_records: usize = outcomes.iter().map(|o| o.result.records.len()).sum();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files ({} line items) in {:?}",
        style("✓").green(),
        outcomes.len(),
        total_records,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcomes.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_output(
    output_dir: &Path,
    outcome: &FileOutcome,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = outcome
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("order");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    fs::write(&output_path, render(&outcome.result.records, format, false)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = chrono::Local::now().to_rfc3339();

    wtr.write_record([
        "filename",
        "status",
        "records",
        "multi_line",
        "fixed_block",
        "fused_line",
        "lines",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let status = if outcome.error().is_some() { "error" } else { "success" };

        wtr.write_record([
            filename,
            status,
            &outcome.result.records.len().to_string(),
            &outcome.count(Layout::MultiLine).to_string(),
            &outcome.count(Layout::FixedBlock).to_string(),
            &outcome.count(Layout::FusedLine).to_string(),
            &outcome.result.line_count.to_string(),
            &outcome.result.processing_time_ms.to_string(),
            &processed_at,
            outcome.error().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
