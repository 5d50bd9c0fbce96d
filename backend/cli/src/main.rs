mod ask_cmd;
mod serve_cmd;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use cookbook_config::{config_dir, config_file_path, load_and_prepare};
use cookbook_logging::{LogTarget, init_logger};

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(about = "Cookbook: add ingredients, ask for a recipe")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.cookbook/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the cookbook web server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ask for a recipe from the command line and stream the answer
    Ask {
        /// Ingredients, in order
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Chat endpoint URL (defaults to the configured one, then the local server)
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Answer in-process without any HTTP call
        #[arg(long)]
        offline: bool,
    },
    /// Check whether the server is up
    Status,
}

impl Commands {
    /// `ask` and `status` print their result on stdout, so logs go to stderr.
    fn log_target(&self) -> LogTarget {
        match self {
            Commands::Serve { .. } => LogTarget::Stdout,
            Commands::Ask { .. } | Commands::Status => LogTarget::Stderr,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (config, report) = load_and_prepare(&path).await?;

    init_logger(config.log_dir(), config.log_level(), cli.command.log_target());
    info!(path = %path.display(), "Loaded config");
    report.emit();
    report.check()?;

    match cli.command {
        Commands::Serve { port } => serve_cmd::run(config, port).await,
        Commands::Ask {
            ingredients,
            endpoint,
            offline,
        } => ask_cmd::run(config, ingredients, endpoint, offline).await,
        Commands::Status => status_cmd::run(&config).await,
    }
}
