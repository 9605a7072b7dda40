//! Service commands

use clap::{Args, Subcommand};
use wookie_core::WidgetAdmin;

use super::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    pub command: ServiceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    /// Register a service
    Add { name: String },
    /// Remove a service and every widget type and default naming it
    Remove { id: i64 },
    List,
}

pub fn execute(args: ServiceArgs, global: &GlobalArgs) -> CommandResult {
    let mut gw = global.open_gateway()?;
    let mut admin = WidgetAdmin::new(&mut gw);

    match args.command {
        ServiceCommand::Add { name } => {
            let id = admin.register_service(&name)?;
            println!("Registered service {} (id {})", name, id);
        }
        ServiceCommand::Remove { id } => {
            admin.remove_service(id)?;
            println!("Removed service {}", id);
        }
        ServiceCommand::List => {
            for service in admin.list_services()? {
                println!("{}\t{}", service.id.unwrap_or_default(), service.service_name);
            }
        }
    }

    Ok(())
}
