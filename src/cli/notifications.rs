use clap::{Args, Subcommand};

use crate::cli::{GlobalOptions, OutputFormat};

#[derive(Args)]
pub struct NotificationArgs {
    #[command(subcommand)]
    pub command: NotificationCommands,
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// Show recorded donor interest, oldest first
    List,

    /// Delete every notification
    Clear,
}

/// Execute notifications subcommand
///
/// # Errors
///
/// Returns an error if the notifications bucket cannot be read or written.
pub fn run(args: NotificationArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut registry = opts.open_registry()?;

    match args.command {
        NotificationCommands::List => {
            let notifications = &registry.state().notifications;
            match opts.format {
                OutputFormat::Text => {
                    if notifications.is_empty() {
                        println!("No notifications.");
                    }
                    for n in notifications {
                        println!(
                            "{:<6} {}  donor {} offers {}",
                            n.id,
                            n.created_at.format("%Y-%m-%d %H:%M"),
                            n.donor,
                            n.organ
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(notifications)?);
                }
                OutputFormat::Tsv => {
                    println!("id\tdonor\torgan\tcreated_at");
                    for n in notifications {
                        println!(
                            "{}\t{}\t{}\t{}",
                            n.id,
                            n.donor,
                            n.organ.as_str(),
                            n.created_at.to_rfc3339()
                        );
                    }
                }
            }
        }
        NotificationCommands::Clear => {
            let cleared = registry.clear_notifications()?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "cleared": cleared })),
                OutputFormat::Text | OutputFormat::Tsv => {
                    println!("Cleared {cleared} notification(s)");
                }
            }
        }
    }

    Ok(())
}
