use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use convoy_core::{ContainerRegistry, Settings, load_container_names};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "convoy")]
#[command(author, version, about = "Interactive dashboard for compose-managed containers")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Compose file to read the container list from
    #[arg(short = 'f', long = "file")]
    compose_file: Option<PathBuf>,

    /// Project prefix for runtime container names
    #[arg(short, long)]
    project: Option<String>,

    /// Container runtime binary (log streaming, process list)
    #[arg(long)]
    runtime_bin: Option<String>,

    /// Compose binary (lifecycle commands)
    #[arg(long)]
    compose_bin: Option<String>,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::new(filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut settings = Settings::load().context("failed to load settings")?;
    if let Some(file) = cli.compose_file {
        settings.compose_file = file;
    }
    if cli.project.is_some() {
        settings.project = cli.project;
    }
    if let Some(bin) = cli.runtime_bin {
        settings.runtime_bin = bin;
    }
    if let Some(bin) = cli.compose_bin {
        settings.compose_bin = bin;
    }

    // A broken compose file must stop us here, before any subprocess is
    // spawned or the terminal is taken over.
    let names = load_container_names(&settings.compose_file).with_context(|| {
        format!(
            "cannot load container list from {}",
            settings.compose_file.display()
        )
    })?;
    let registry = ContainerRegistry::from_names(names);

    tracing::info!(
        containers = registry.len(),
        project = %settings.project_prefix(),
        "launching dashboard"
    );
    convoy_tui::run(&settings, registry).await
}
