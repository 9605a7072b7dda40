use std::path::PathBuf;

use clap::Args;
use wookie_store::SqliteGateway;

pub mod default;
pub mod service;
pub mod whitelist;
pub mod widget;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Options shared by every subcommand
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database file (created and migrated on first use)
    #[arg(
        long,
        global = true,
        env = "WOOKIE_DB",
        default_value = ".wookie/wookie.db"
    )]
    pub db: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl GlobalArgs {
    pub fn open_gateway(&self) -> Result<SqliteGateway, Box<dyn std::error::Error>> {
        Ok(SqliteGateway::open(&self.db)?)
    }
}
