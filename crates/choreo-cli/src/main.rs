use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use choreo_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "choreo")]
#[command(author, version, about = "Scroll choreography engine for a single-page site")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the landing page in the terminal
    Preview,
    /// List the snap targets collected from pinned sections
    Targets {
        #[arg(long)]
        json: bool,
    },
    /// Resolve a section's scroll timelines at a progress value
    Sample {
        /// Section id (e.g. `services`)
        section: String,
        /// Scroll progress through the section, 0.0..=1.0
        progress: f64,
        #[arg(long)]
        json: bool,
    },
    /// Show where a normalized scroll position settles
    Snap {
        /// Normalized scroll position, 0.0..=1.0
        value: f64,
    },
    /// Print section geometry for the configured viewport
    Layout {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    let preview = matches!(cli.command, Some(Commands::Preview) | None);
    init_logging(&config, preview)?;

    match cli.command {
        Some(Commands::Preview) | None => commands::preview::run(config).await,
        Some(Commands::Targets { json }) => commands::targets::run(&config, json).await,
        Some(Commands::Sample {
            section,
            progress,
            json,
        }) => commands::sample::run(&config, &section, progress, json),
        Some(Commands::Snap { value }) => commands::snap::run(&config, value).await,
        Some(Commands::Layout { json }) => commands::layout::run(&config, json),
    }
}

/// The preview owns the terminal, so it logs to a file instead of stderr
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
