use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tubesum_common::{logger, AppConfig, TubesumError};

/// Nearest ancestor of `start` (inclusive) holding a `.git` entry
fn repo_root_above(start: &Path) -> Option<&Path> {
    start.ancestors().find(|dir| dir.join(".git").exists())
}

/// `.env` at the repository root, if the working directory is inside one
fn dotenv_path(cwd: &Path) -> Option<PathBuf> {
    repo_root_above(cwd)
        .map(|root| root.join(".env"))
        .filter(|path| path.is_file())
}

/// Populate the environment from `.env`; variables already set win
fn load_env_file() {
    let from_root = std::env::current_dir()
        .ok()
        .and_then(|cwd| dotenv_path(&cwd));

    match from_root {
        Some(path) => {
            dotenv::from_path(&path).ok();
        }
        None => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "tubesum")]
#[command(about = "Tubesum - YouTube transcript and summarization relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Text printed when startup aborts
///
/// Configuration problems are reported without the error-kind prefix so the
/// operator sees e.g. `upstream API_KEY not set in environment variables`.
fn startup_message(err: &TubesumError) -> String {
    match err {
        TubesumError::Config(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Load configuration; a missing API key ends the process before binding
fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", startup_message(&e));
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env_file();

    let mut config = load_config();

    if let Some(Commands::Serve { host, port }) = cli.command {
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        config.validate()?;
    }

    match &config.log_dir {
        Some(dir) => logger::setup_logging(dir, &config.log_level)?,
        None => logger::setup_console_logging(&config.log_level)?,
    }

    tracing::info!("Tubesum starting...");
    tracing::info!("Configuration loaded: {:?}", config);

    println!("Server listening on http://{}", config.server_bind_address());

    tubesum_server::start_server(config).await?;

    Ok(())
}
