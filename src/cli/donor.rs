use clap::{Args, Subcommand};

use crate::cli::{GlobalOptions, OutputFormat};
use crate::core::donor::Donor;
use crate::core::types::{BloodGroup, DonorId, OrganType};
use crate::store::registry::Withdrawal;

#[derive(Args)]
pub struct DonorArgs {
    #[command(subcommand)]
    pub command: DonorCommands,
}

#[derive(Subcommand)]
pub enum DonorCommands {
    /// Pledge one or more organs
    Pledge {
        /// Donor's full name
        #[arg(long, required = true)]
        name: String,

        /// Blood group (A+, A-, B+, B-, AB+, AB-, O+, O-)
        #[arg(long, required = true)]
        blood_group: BloodGroup,

        /// Organ to pledge; repeat for several
        #[arg(long = "organ", required = true, num_args = 1..)]
        organs: Vec<OrganType>,
    },

    /// Withdraw a single organ from a pledge
    Withdraw {
        /// Donor ID (e.g., "D-3")
        #[arg(required = true)]
        id: String,

        /// Organ to withdraw
        #[arg(required = true)]
        organ: OrganType,
    },

    /// List all pledged donors
    List {
        /// Only donors who pledged this organ
        #[arg(long)]
        organ: Option<OrganType>,
    },
}

/// Execute donor subcommand
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or the action is rejected.
pub fn run(args: DonorArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut registry = opts.open_registry()?;

    match args.command {
        DonorCommands::Pledge {
            name,
            blood_group,
            organs,
        } => {
            let donor = registry.pledge(&name, blood_group, organs, opts.now())?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&donor)?),
                OutputFormat::Text | OutputFormat::Tsv => {
                    println!("Pledge recorded: {} ({})", donor.id, organ_list(&donor));
                }
            }
        }
        DonorCommands::Withdraw { id, organ } => {
            let outcome = registry.withdraw_organ(&DonorId::new(&id), organ)?;
            match opts.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                OutputFormat::Text | OutputFormat::Tsv => match outcome {
                    Withdrawal::Updated { remaining } => {
                        let names = remaining
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ");
                        println!("Withdrew {organ} from {id}; still pledged: {names}");
                    }
                    Withdrawal::DonorRemoved => {
                        println!("Withdrew {organ}; {id} has no organs left and was removed");
                    }
                },
            }
        }
        DonorCommands::List { organ } => {
            let donors: Vec<&Donor> = registry
                .state()
                .donors
                .iter()
                .filter(|d| organ.map_or(true, |o| d.has_pledged(o)))
                .collect();
            print_donors(&donors, opts.format)?;
        }
    }

    Ok(())
}

fn organ_list(donor: &Donor) -> String {
    donor
        .organs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_donors(donors: &[&Donor], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if donors.is_empty() {
                println!("No donors have pledged yet.");
                return Ok(());
            }
            println!(
                "{:<8} {:<24} {:<6} {:<12} Organs",
                "ID", "Name", "Blood", "Pledged"
            );
            println!("{}", "-".repeat(72));
            for donor in donors {
                println!(
                    "{:<8} {:<24} {:<6} {:<12} {}",
                    donor.id,
                    donor.name,
                    donor.blood_group,
                    donor.pledged_at.format("%Y-%m-%d"),
                    organ_list(donor)
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(donors)?),
        OutputFormat::Tsv => {
            println!("id\tname\tblood_group\tpledged_at\torgans");
            for donor in donors {
                let organs: Vec<&str> = donor.organs.iter().map(|o| o.as_str()).collect();
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    donor.id,
                    donor.name,
                    donor.blood_group,
                    donor.pledged_at.to_rfc3339(),
                    organs.join(",")
                );
            }
        }
    }
    Ok(())
}
