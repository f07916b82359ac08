//! Lines command - dump the normalized lines the layouts read.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use orderlines_core::normalize_lines;
use orderlines_core::pipeline::load_document_text;

use super::load_config;

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// Input document (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output text file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix each line with its zero-based index
    #[arg(short, long)]
    numbered: bool,
}

pub async fn run(args: LinesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let document = match load_document_text(&args.input, &config.pdf) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            anyhow::bail!("Source unavailable: {}", args.input.display());
        }
    };
    if !document.has_text_layer {
        eprintln!(
            "{} PDF has little or no text layer; it may be a scanned document",
            style("⚠").yellow()
        );
    }

    let lines = normalize_lines(&document.text);
    info!("{} non-empty lines in {}", lines.len(), args.input.display());

    let output = format_lines(&lines, args.numbered);

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} lines written to {}",
            style("✓").green(),
            lines.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn format_lines(lines: &[String], numbered: bool) -> String {
    let width = lines.len().saturating_sub(1).to_string().len();

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if numbered {
                format!("{:>width$}  {}\n", index, line, width = width)
            } else {
                format!("{}\n", line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &str) -> Vec<String> {
        normalize_lines(raw)
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(format_lines(&lines("  a \n\n b\r\n"), false), "a\nb\n");
        assert_eq!(format_lines(&[], false), "");
    }

    #[test]
    fn test_numbered_lines_are_aligned() {
        let raw: String = (0..11).map(|i| format!("line {}\n", i)).collect();
        let output = format_lines(&lines(&raw), true);

        assert!(output.starts_with(" 0  line 0\n 1  line 1\n"));
        assert!(output.ends_with("10  line 10\n"));
    }
}
