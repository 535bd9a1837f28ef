use anyhow::Result;
use clap::{Parser, Subcommand};
use prism_facets::config::{Config, LogFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "prism-facets")]
#[command(about = "Build, run and decode faceted searches")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "facets.toml", env = "PRISM_FACETS_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the search body compiled from the configured facets
    Compile,

    /// Run the configured search and print the facets
    Search {
        /// Server URL, overrides [server].url
        #[arg(long)]
        url: Option<String>,

        /// Index, overrides [search].index
        #[arg(short, long)]
        index: Option<String>,

        /// Print the decoded facets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a saved search response
    Decode {
        /// Response body file; `-` reads stdin
        #[arg(short, long)]
        input: PathBuf,

        /// Print the decoded facets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an example configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `init` runs before a config exists
    if let Commands::Init { force } = cli.command {
        init_tracing(&Config::default());
        return commands::run_init(&cli.config, force);
    }

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    init_tracing(&config);

    match cli.command {
        Commands::Compile => commands::run_compile(&config),
        Commands::Search { url, index, json } => {
            commands::run_search(config, url, index, json).await
        }
        Commands::Decode { input, json } => commands::run_decode(&input, json),
        Commands::Init { .. } => Ok(()),
    }
}
