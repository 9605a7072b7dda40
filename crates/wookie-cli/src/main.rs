//! Wookie CLI
//!
//! Command-line administration of widgets, services, defaults and the
//! whitelist.

use clap::{Parser, Subcommand};
use wookie_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "wookie")]
#[command(about = "Wookie - widget server administration", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Widget services
    Service(commands::service::ServiceArgs),
    /// Whitelisted URIs
    Whitelist(commands::whitelist::WhitelistArgs),
    /// Widget registration, lookup and removal
    Widget(commands::widget::WidgetArgs),
    /// Default widgets per service type
    Default(commands::default::DefaultArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.global.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Service(args) => commands::service::execute(args, &cli.global),
        Commands::Whitelist(args) => commands::whitelist::execute(args, &cli.global),
        Commands::Widget(args) => commands::widget::execute(args, &cli.global),
        Commands::Default(args) => commands::default::execute(args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
