//! CLI application for purchase-order line item extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, layouts, lines};

/// Purchase order line items - Extract order lines from vendor purchase orders
#[derive(Parser)]
#[command(name = "orderlines")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract line items from a single document
    Extract(extract::ExtractArgs),

    /// Extract line items from multiple documents
    Batch(batch::BatchArgs),

    /// Print the normalized text lines of a document
    Lines(lines::LinesArgs),

    /// List supported layouts
    Layouts,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Lines(args) => lines::run(args, cli.config.as_deref()).await,
        Commands::Layouts => layouts::run().await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
