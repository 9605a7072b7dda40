//! Runtime arguments
//!
//! Flags (with environment fallbacks) plus the legacy `port=NNNN` and
//! `initDB=false` tokens older launch scripts pass positionally.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use wookie_core::errors::{ExError, ExErrorKind};

#[derive(Debug, Clone, Parser)]
#[command(name = "wookie-server")]
#[command(about = "Wookie - standalone widget server", long_about = None)]
pub struct ServerArgs {
    /// HTTP port
    #[arg(long, env = "WOOKIE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Loopback port that stops the server when it receives a line
    #[arg(long, env = "WOOKIE_STOP_PORT", default_value_t = 8079)]
    pub stop_port: u16,

    /// Apply schema migrations before serving
    #[arg(long, env = "WOOKIE_INIT_DB", default_value_t = true, action = ArgAction::Set)]
    pub init_db: bool,

    #[arg(long, env = "WOOKIE_DB", default_value = ".wookie/wookie.db")]
    pub db: PathBuf,

    /// Path prefix every route is served under
    #[arg(long, default_value = "/wookie")]
    pub context_path: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Legacy `port=NNNN` / `initDB=BOOL` tokens
    #[arg(value_name = "KEY=VALUE")]
    pub legacy: Vec<String>,
}

/// Resolved server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub stop_port: u16,
    pub init_db: bool,
    pub db: PathBuf,
    pub context_path: String,
}

impl ServerConfig {
    /// Apply legacy tokens on top of the flags
    ///
    /// Each token is logged; unrecognised ones are reported and ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a `port=` token is not a valid port number.
    pub fn from_args(args: ServerArgs) -> Result<Self, ExError> {
        let mut config = Self {
            port: args.port,
            stop_port: args.stop_port,
            init_db: args.init_db,
            db: args.db,
            context_path: normalize_context_path(&args.context_path),
        };

        for token in &args.legacy {
            tracing::info!(argument = token.as_str(), "runtime argument");
            if let Some(port) = token.strip_prefix("port=") {
                config.port = port.trim().parse().map_err(|_| {
                    ExError::new(ExErrorKind::InvalidInput)
                        .with_op("parse_args")
                        .with_message(format!("invalid port '{}'", port))
                })?;
            } else if let Some(flag) = token.strip_prefix("initDB=") {
                config.init_db = !flag.trim().eq_ignore_ascii_case("false");
            } else {
                tracing::warn!(argument = token.as_str(), "argument unrecognised, ignoring");
            }
        }

        Ok(config)
    }
}

/// `"wookie/"` becomes `"/wookie"`; `""` and `"/"` mean the root
pub fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
