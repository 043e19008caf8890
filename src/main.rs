//! # readaloud CLI
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `readaloud serve` | Start the HTTP server (default) |
//! | `readaloud init` | Create the SQLite database and schema |
//! | `readaloud get <url>` | Print the stored text for a URL |
//! | `readaloud extract <url>` | Fetch and extract a page without storing it |

use clap::{Parser, Subcommand};
use readaloud::store::{RecordStore, SqliteStore};
use readaloud::{config, extract_cmd, get, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// readaloud — fetch a web page, keep its readable text, and read it back
/// in the browser.
#[derive(Parser)]
#[command(name = "readaloud", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Built-in defaults are used when the file does not exist. The `PORT`
    /// environment variable overrides `[server].port`.
    #[arg(long, global = true, default_value = "./config/readaloud.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Creates the schema if needed, then serves until Ctrl-C.
    Serve,

    /// Create the database file and schema. Safe to run repeatedly.
    Init,

    /// Print the most recent stored text for a URL.
    Get {
        /// The URL exactly as it was submitted.
        url: String,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch and extract a page without storing it.
    Extract {
        /// Absolute http(s) URL.
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Init => {
            let store = SqliteStore::open(&cfg.db).await?;
            store.close().await;
            println!("Database initialized at {}", cfg.db.path.display());
        }
        Commands::Get { url, json } => {
            get::run_get(&cfg, &url, json).await?;
        }
        Commands::Extract { url } => {
            extract_cmd::run_extract(&cfg, &url).await?;
        }
    }

    Ok(())
}
