//! Default widget commands

use clap::{Args, Subcommand};
use wookie_core::WidgetAdmin;

use super::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct DefaultArgs {
    #[command(subcommand)]
    pub command: DefaultCommand,
}

#[derive(Debug, Subcommand)]
pub enum DefaultCommand {
    List,
    /// Remove defaults by widget (optionally one service type) or by service
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    #[arg(long, conflicts_with = "service", required_unless_present = "service")]
    pub widget: Option<i64>,

    #[arg(long, requires = "widget")]
    pub service_type: Option<String>,

    /// Service name; removes its default whichever widget it names
    #[arg(long, conflicts_with = "widget")]
    pub service: Option<String>,
}

pub fn execute(args: DefaultArgs, global: &GlobalArgs) -> CommandResult {
    let mut gw = global.open_gateway()?;
    let mut admin = WidgetAdmin::new(&mut gw);

    match args.command {
        DefaultCommand::List => {
            for default in admin.list_widget_defaults()? {
                println!("{}\t{}", default.widget_context, default.widget_id);
            }
        }
        DefaultCommand::Remove(remove) => {
            let removed = match (remove.widget, remove.service_type, remove.service) {
                (Some(widget_id), Some(service_type), _) => {
                    admin.delete_widget_default_by_widget_and_service(widget_id, &service_type)?
                }
                (Some(widget_id), None, _) => admin.delete_widget_default_by_widget(widget_id)?,
                (None, _, Some(service)) => admin.delete_widget_default_by_service_name(&service)?,
                (None, _, None) => return Err("Must specify either --widget or --service".into()),
            };
            println!("Removed {} default(s)", removed);
        }
    }

    Ok(())
}
