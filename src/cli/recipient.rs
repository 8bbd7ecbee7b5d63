use clap::{Args, Subcommand};

use crate::catalog::hospitals::HospitalDirectory;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::core::recipient::Recipient;
use crate::core::types::{
    BloodGroup, HospitalId, OrganType, RecipientId, RecipientStatus, Urgency,
};
use crate::store::registry::NewRecipient;

#[derive(Args)]
pub struct RecipientArgs {
    #[command(subcommand)]
    pub command: RecipientCommands,
}

#[derive(Subcommand)]
pub enum RecipientCommands {
    /// Add a patient to the waitlist
    Register {
        /// Patient's full name
        #[arg(long, required = true)]
        name: String,

        /// Hospital-issued patient identifier (e.g., "PT-1001")
        #[arg(long, required = true)]
        patient_id: String,

        /// Blood group (A+, A-, B+, B-, AB+, AB-, O+, O-)
        #[arg(long, required = true)]
        blood_group: BloodGroup,

        /// Organ needed
        #[arg(long, required = true)]
        organ: OrganType,

        /// Urgency level (critical, high, medium)
        #[arg(long, default_value = "medium")]
        urgency: Urgency,

        /// Affiliated hospital ID from the directory (e.g., "H001")
        #[arg(long)]
        hospital: Option<String>,
    },

    /// List the waitlist
    List {
        /// Only recipients needing this organ
        #[arg(long)]
        organ: Option<OrganType>,

        /// Only recipients at this urgency
        #[arg(long)]
        urgency: Option<Urgency>,

        /// Only recipients in this status ("searching" or "potential-match-found")
        #[arg(long)]
        status: Option<RecipientStatus>,
    },

    /// Change a recipient's urgency
    Urgency {
        /// Recipient ID (e.g., "R-2")
        #[arg(required = true)]
        id: String,

        /// New urgency level
        #[arg(required = true)]
        urgency: Urgency,
    },

    /// Remove a recipient from the waitlist
    Remove {
        /// Recipient ID
        #[arg(required = true)]
        id: String,
    },

    /// Add synthetic recipients for demos and load testing
    Simulate {
        /// Number of recipients to create
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
}

/// Execute recipient subcommand
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or the action is rejected.
pub fn run(args: RecipientArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut registry = opts.open_registry()?;

    match args.command {
        RecipientCommands::Register {
            name,
            patient_id,
            blood_group,
            organ,
            urgency,
            hospital,
        } => {
            let form = NewRecipient {
                name,
                patient_id,
                blood_group,
                organ_needed: organ,
                urgency,
                hospital: hospital.map(HospitalId::new),
            };
            let recipient = registry.register_recipient(form, opts.now())?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipient)?),
                OutputFormat::Text | OutputFormat::Tsv => println!(
                    "Registered {} ({}) for {} at {} urgency",
                    recipient.id, recipient.patient_id, recipient.organ_needed, recipient.urgency
                ),
            }
        }
        RecipientCommands::List {
            organ,
            urgency,
            status,
        } => {
            let recipients: Vec<&Recipient> = registry
                .state()
                .recipients
                .iter()
                .filter(|r| organ.map_or(true, |o| r.organ_needed == o))
                .filter(|r| urgency.map_or(true, |u| r.urgency == u))
                .filter(|r| status.map_or(true, |s| r.status == s))
                .collect();
            print_recipients(&recipients, registry.hospitals(), opts.format)?;
        }
        RecipientCommands::Urgency { id, urgency } => {
            let recipient = registry.update_urgency(&RecipientId::new(&id), urgency)?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipient)?),
                OutputFormat::Text | OutputFormat::Tsv => {
                    println!("{} is now at {} urgency", recipient.id, recipient.urgency);
                }
            }
        }
        RecipientCommands::Remove { id } => {
            let removed = registry.remove_recipient(&RecipientId::new(&id))?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&removed)?),
                OutputFormat::Text | OutputFormat::Tsv => {
                    println!(
                        "Removed {} ({}) from the waitlist",
                        removed.id, removed.patient_id
                    );
                }
            }
        }
        RecipientCommands::Simulate { count } => {
            let created = registry.simulate_recipients(count, opts.now())?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
                OutputFormat::Text | OutputFormat::Tsv => {
                    println!("Added {} simulated recipient(s)", created.len());
                }
            }
        }
    }

    Ok(())
}

fn print_recipients(
    recipients: &[&Recipient],
    hospitals: &HospitalDirectory,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if recipients.is_empty() {
                println!("The waitlist is empty.");
                return Ok(());
            }
            println!(
                "{:<8} {:<10} {:<22} {:<6} {:<10} {:<9} {:<22} Hospital",
                "ID", "Patient", "Name", "Blood", "Organ", "Urgency", "Status"
            );
            println!("{}", "-".repeat(110));
            for r in recipients {
                println!(
                    "{:<8} {:<10} {:<22} {:<6} {:<10} {:<9} {:<22} {}",
                    r.id,
                    r.patient_id,
                    r.name,
                    r.blood_group,
                    r.organ_needed,
                    r.urgency,
                    r.status,
                    hospitals.describe(r.hospital.as_ref())
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(recipients)?),
        OutputFormat::Tsv => {
            println!("id\tpatient_id\tname\tblood_group\torgan_needed\turgency\tstatus\tjoined_at\thospital");
            for r in recipients {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    r.id,
                    r.patient_id,
                    r.name,
                    r.blood_group,
                    r.organ_needed.as_str(),
                    r.urgency,
                    r.status,
                    r.joined_at.to_rfc3339(),
                    r.hospital.as_ref().map_or("", |h| h.0.as_str())
                );
            }
        }
    }
    Ok(())
}
