use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use quarkus_wizard::{commands, core::config::Config, wizard::terminal::TerminalBackend};

#[derive(Parser)]
#[clap(name = "quarkus-wizard")]
#[clap(about = "Generate Quarkus projects and manage their extensions")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new Quarkus project interactively
    Generate {
        /// Project generator API to use instead of the configured one
        #[clap(long)]
        api_url: Option<String>,
    },
    /// Add extensions to an existing Maven project
    AddExtensions {
        /// Path to pom.xml or the directory holding it (default: current directory)
        pom: Option<PathBuf>,
        /// Project generator API to use instead of the configured one
        #[clap(long)]
        api_url: Option<String>,
    },
    /// List the extensions offered by the project generator
    Extensions {
        /// Print the catalog as JSON
        #[clap(long)]
        json: bool,
        /// Project generator API to use instead of the configured one
        #[clap(long)]
        api_url: Option<String>,
    },
    /// Show the configuration
    Config {
        /// Write a default configuration file if none exists
        #[clap(long)]
        init: bool,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> quarkus_wizard::error::Result<()> {
    match command {
        Commands::Generate { api_url } => {
            let config = Config::load()?.with_api_url(api_url);
            commands::generate::generate_project(&config, Box::new(TerminalBackend::new()))
                .await
                .map(|_| ())
        }
        Commands::AddExtensions { pom, api_url } => {
            let config = Config::load()?.with_api_url(api_url);
            commands::add_extensions::add_extensions(&config, pom, Box::new(TerminalBackend::new()))
                .await
        }
        Commands::Extensions { json, api_url } => {
            let config = Config::load()?.with_api_url(api_url);
            commands::extensions::list_extensions(&config, json).await
        }
        Commands::Config { init } => commands::config::show_config(init),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = run(cli.command).await.map_err(|e| anyhow::anyhow!(e));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
