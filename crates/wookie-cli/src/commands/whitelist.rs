//! Whitelist commands

use clap::{Args, Subcommand};
use wookie_core::WidgetAdmin;

use super::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct WhitelistArgs {
    #[command(subcommand)]
    pub command: WhitelistCommand,
}

#[derive(Debug, Subcommand)]
pub enum WhitelistCommand {
    Add { uri: String },
    Remove { id: i64 },
    List,
}

pub fn execute(args: WhitelistArgs, global: &GlobalArgs) -> CommandResult {
    let mut gw = global.open_gateway()?;
    let mut admin = WidgetAdmin::new(&mut gw);

    match args.command {
        WhitelistCommand::Add { uri } => {
            let id = admin.register_whitelist_entry(&uri)?;
            println!("Whitelisted {} (id {})", uri, id);
        }
        WhitelistCommand::Remove { id } => {
            admin.remove_whitelist_entry(id)?;
            println!("Removed whitelist entry {}", id);
        }
        WhitelistCommand::List => {
            for entry in admin.list_whitelist()? {
                println!("{}\t{}", entry.id.unwrap_or_default(), entry.f_url);
            }
        }
    }

    Ok(())
}
