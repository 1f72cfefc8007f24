//! # destiny
//!
//! Command-line front end for Star Destiny.
//!
//! - `resolve` shows the mansion for a birth date without side effects
//! - `submit` resolves, remembers the result and relays it to the
//!   collection webhooks
//! - `show` prints the remembered result
//! - `device`, `catalog` and `reset` cover the rest of the local state

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use destiny_client::commands;
use destiny_client::{AppState, ClientConfig};
use destiny_store::{Enrichment, KvStore};

#[derive(Debug, Parser)]
#[command(name = "destiny", version, about = "Find the lunar mansion of a birth date")]
struct Cli {
    /// SQLite database file (overrides DESTINY_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the mansion for a date (YYYY-MM-DD) without saving or sending
    Resolve { date: String },

    /// Resolve a date, remember it and relay it to the webhooks
    Submit {
        /// Birth date, YYYY-MM-DD
        date: String,

        /// Visitor name reported downstream
        #[arg(long)]
        name: Option<String>,

        /// Organization unit, outermost first (repeatable)
        #[arg(long = "unit")]
        units: Vec<String>,

        /// Role or position
        #[arg(long)]
        role: Option<String>,
    },

    /// Print the remembered result
    Show,

    /// Print this device's token
    Device,

    /// List all 28 mansions
    Catalog,

    /// Forget the remembered result
    Reset {
        /// Also drop the device token and dedup flags
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    destiny_client::init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }

    // Commands that never touch local state.
    match &cli.command {
        Command::Resolve { date } => return commands::record::resolve(date, cli.json),
        Command::Catalog => return commands::catalog::list(cli.json),
        _ => {}
    }

    let db = Arc::new(commands::open_database(&config)?);
    let kv: Arc<dyn KvStore> = db.clone();
    let state = AppState::from_config(kv, &config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        dedup_version = %config.dedup_version,
        "destiny client ready"
    );

    match cli.command {
        Command::Submit {
            date,
            name,
            units,
            role,
        } => {
            let enrichment = Enrichment::new(name, units, role);
            commands::record::submit(&state, &date, enrichment, config.flush_timeout, cli.json)
                .await
        }
        Command::Show => commands::record::show(&state, cli.json),
        Command::Device => commands::device::show(&state, cli.json),
        Command::Reset { all } => commands::record::reset(&state, &db, all),
        Command::Resolve { .. } | Command::Catalog => Ok(()),
    }
}
