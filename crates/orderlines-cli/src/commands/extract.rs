//! Extract command - read line items from a single purchase order.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use orderlines_core::extract::Layout;
use orderlines_core::models::config::{ExtractionConfig, OrderLinesConfig};
use orderlines_core::normalize_lines;
use orderlines_core::pipeline::extract_document_with;

use super::output::{render, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Layout to run (a|multi-line, b|fixed-block, c|fused-line); repeatable
    #[arg(short = 'l', long = "layout")]
    layouts: Vec<Layout>,

    /// Run all layouts in a single pass, keeping records in document order
    #[arg(long)]
    interleaved: bool,

    /// File with one stop word per line, replacing the configured list
    #[arg(long)]
    stop_words: Option<PathBuf>,
}

/// Apply command line overrides shared by `extract` and `batch`.
pub(super) fn extraction_overrides(
    config: &OrderLinesConfig,
    layouts: &[Layout],
    interleaved: bool,
    stop_words: Option<&Path>,
) -> anyhow::Result<ExtractionConfig> {
    let mut extraction = config.extraction.clone();

    if !layouts.is_empty() {
        extraction.layouts = layouts.to_vec();
    }
    if interleaved {
        extraction.interleaved = true;
    }
    if let Some(path) = stop_words {
        let content = fs::read_to_string(path)?;
        extraction.stop_words = normalize_lines(&content);
        debug!("Loaded {} stop words from {}", extraction.stop_words.len(), path.display());
    }

    for layout in layouts.iter().filter(|l| l.is_experimental()) {
        eprintln!(
            "{} Layout {} ({}) is experimental; review its records",
            style("⚠").yellow(),
            layout,
            layout.vendor()
        );
    }

    Ok(extraction)
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let extraction = extraction_overrides(
        &config,
        &args.layouts,
        args.interleaved,
        args.stop_words.as_deref(),
    )?;
    let dispatcher = extraction.dispatcher();

    info!("Extracting from {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {}...", args.input.display()));

    let result = extract_document_with(&args.input, &dispatcher, &config.pdf);

    pb.finish_and_clear();

    if result.source_unavailable {
        for warning in &result.warnings {
            eprintln!("{} {}", style("✗").red(), warning);
        }
        anyhow::bail!("Source unavailable: {}", args.input.display());
    }

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = render(&result.records, args.format, args.output.is_none())?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            result.records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!(
        "{} lines, {} records, total time {:?}",
        result.line_count,
        result.records.len(),
        start.elapsed()
    );

    Ok(())
}
