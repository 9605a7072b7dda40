//! Widget commands

use std::path::PathBuf;

use clap::{Args, Subcommand};
use wookie_core::errors::WookieError;
use wookie_core::WidgetAdmin;
use wookie_store::load_manifest;

use super::{CommandResult, GlobalArgs};

#[derive(Debug, Args)]
pub struct WidgetArgs {
    #[command(subcommand)]
    pub command: WidgetCommand,
}

#[derive(Debug, Subcommand)]
pub enum WidgetCommand {
    /// Register a widget from a .json or .yaml manifest
    Register {
        manifest: PathBuf,
        /// Service type to tag the widget with (repeatable)
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<String>,
    },
    /// Remove a widget together with everything that references it
    Remove { id: i64 },
    List,
    /// Print a widget's manifest identifier
    Guid { id: i64 },
    /// Print "true" if exactly one widget has this identifier, "false" otherwise
    Exists { guid: String },
    Maximized { id: i64 },
    /// Service type tags
    Types(TypesArgs),
    /// Make a widget the default for a service type
    Default { id: i64, service_type: String },
}

#[derive(Debug, Args)]
pub struct TypesArgs {
    #[command(subcommand)]
    pub command: TypesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TypesCommand {
    /// Add the types a widget does not already carry
    Set {
        id: i64,
        #[arg(required = true)]
        types: Vec<String>,
        #[arg(long)]
        maximize: bool,
    },
    Remove {
        id: i64,
        #[arg(value_name = "TYPE")]
        type_name: String,
    },
    /// "true" iff exactly one tag matches exactly
    Has {
        id: i64,
        #[arg(value_name = "TYPE")]
        type_name: String,
    },
    List { id: i64 },
}

pub fn execute(args: WidgetArgs, global: &GlobalArgs) -> CommandResult {
    let mut gw = global.open_gateway()?;
    let mut admin = WidgetAdmin::new(&mut gw);

    match args.command {
        WidgetCommand::Register { manifest, types } => {
            let manifest = load_manifest(&manifest)?;
            let service_types = (!types.is_empty()).then_some(types.as_slice());
            let id = admin.register_widget(&manifest, service_types)?;
            println!("Registered widget {} (id {})", manifest.identifier, id);
        }
        WidgetCommand::Remove { id } => {
            if !admin.remove_widget_and_references(id)? {
                return Err(WookieError::WidgetNotFound { widget_id: id }.into());
            }
            println!("Removed widget {}", id);
        }
        WidgetCommand::List => {
            for summary in admin.list_widgets()? {
                let widget = summary.widget;
                println!(
                    "{}\t{}\t{}\t{}",
                    widget.id.unwrap_or_default(),
                    widget.guid,
                    widget.widget_title,
                    summary.types.join(",")
                );
            }
        }
        WidgetCommand::Guid { id } => {
            println!("{}", admin.widget_guid(id)?);
        }
        WidgetCommand::Exists { guid } => {
            println!("{}", admin.widget_exists(&guid)?);
        }
        WidgetCommand::Maximized { id } => {
            println!("{}", admin.is_widget_maximized(id)?);
        }
        WidgetCommand::Types(types) => match types.command {
            TypesCommand::Set {
                id,
                types,
                maximize,
            } => {
                admin.set_widget_types_for_widget(id, &types, maximize)?;
                println!("Updated types for widget {}", id);
            }
            TypesCommand::Remove { id, type_name } => {
                let removed = admin.remove_widget_type(id, &type_name)?;
                if removed {
                    println!("Removed type {} from widget {}", type_name, id);
                } else {
                    println!("Widget {} has no type {}", id, type_name);
                }
            }
            TypesCommand::Has { id, type_name } => {
                println!("{}", admin.service_exists_for_widget(id, &type_name)?);
            }
            TypesCommand::List { id } => {
                for widget_type in admin.widget_types(id)? {
                    println!("{}", widget_type.widget_context);
                }
            }
        },
        WidgetCommand::Default { id, service_type } => {
            admin.set_default_widget(id, &service_type)?;
            println!("Widget {} is now the default for {}", id, service_type);
        }
    }

    Ok(())
}
