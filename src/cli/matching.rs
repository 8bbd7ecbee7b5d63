//! `match`, `score` and `interest` commands.

use clap::Args;
use serde::Serialize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::core::types::{BloodGroup, DonorId, OrganType, RecipientId};
use crate::matching::engine::MatchResult;
use crate::store::registry::Registry;

#[derive(Args)]
pub struct ScoreArgs {
    /// Recipient ID (e.g., "R-2")
    #[arg(required = true)]
    pub id: String,
}

#[derive(Args)]
pub struct InterestArgs {
    /// Donor ID offering the organ
    #[arg(required = true)]
    pub donor_id: String,

    /// Organ being offered
    #[arg(required = true)]
    pub organ: OrganType,
}

/// A match row joined with the donor and recipient details worth printing
#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    #[serde(flatten)]
    result: &'a MatchResult,
    patient_id: &'a str,
    recipient_blood_group: BloodGroup,
    donor_blood_group: BloodGroup,
    hospital: String,
}

fn build_rows<'a>(registry: &'a Registry, matches: &'a [MatchResult]) -> Vec<MatchRow<'a>> {
    let state = registry.state();
    matches
        .iter()
        .filter_map(|m| {
            let recipient = state.recipient(&m.recipient)?;
            let donor = state.donor(&m.donor)?;
            Some(MatchRow {
                result: m,
                patient_id: &recipient.patient_id,
                recipient_blood_group: recipient.blood_group,
                donor_blood_group: donor.blood_group,
                hospital: registry.hospitals().describe(recipient.hospital.as_ref()),
            })
        })
        .collect()
}

/// Execute match command
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or is inconsistent.
pub fn run_match(opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = opts.open_registry()?;
    let matches = registry.run_matching(opts.now())?;
    let rows = build_rows(&registry, &matches);
    let waiting = registry.state().waitlist().count();

    match opts.format {
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No compatible donor-recipient pairs found ({waiting} waiting).");
                return Ok(());
            }
            println!(
                "{:<8} {:<10} {:<6} {:<8} {:<6} {:<10} {:>6}  Hospital",
                "Recip.", "Patient", "Blood", "Donor", "Blood", "Organ", "Score"
            );
            println!("{}", "-".repeat(90));
            for row in &rows {
                println!(
                    "{:<8} {:<10} {:<6} {:<8} {:<6} {:<10} {:>6}  {}",
                    row.result.recipient,
                    row.patient_id,
                    row.recipient_blood_group,
                    row.result.donor,
                    row.donor_blood_group,
                    row.result.organ,
                    row.result.priority_score,
                    row.hospital
                );
            }
            println!();
            let count = rows.len();
            println!("{count} match(es) for {waiting} waiting recipient(s)");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Tsv => {
            println!("recipient\tpatient_id\trecipient_blood_group\tdonor\tdonor_blood_group\torgan\tpriority_score");
            for row in &rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    row.result.recipient,
                    row.patient_id,
                    row.recipient_blood_group,
                    row.result.donor,
                    row.donor_blood_group,
                    row.result.organ.as_str(),
                    row.result.priority_score
                );
            }
        }
    }

    Ok(())
}

/// Execute score command
///
/// # Errors
///
/// Returns an error if the recipient is unknown.
pub fn run_score(args: ScoreArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = opts.open_registry()?;
    let id = RecipientId::new(&args.id);
    let score = registry.score(&id, opts.now())?;

    match opts.format {
        OutputFormat::Text => {
            println!("Priority score for {id}: {}", score.total);
            println!("  Urgency base: {}", score.urgency_base);
            println!("  Days waiting: {}", score.days_waiting);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&score)?),
        OutputFormat::Tsv => {
            println!("recipient\turgency_base\tdays_waiting\ttotal");
            println!(
                "{id}\t{}\t{}\t{}",
                score.urgency_base, score.days_waiting, score.total
            );
        }
    }

    Ok(())
}

/// Execute interest command
///
/// # Errors
///
/// Returns an error if the donor is unknown or has not pledged the organ.
pub fn run_interest(args: InterestArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mut registry = opts.open_registry()?;
    let donor = DonorId::new(&args.donor_id);
    let outcome = registry.express_interest(&donor, args.organ, opts.now())?;

    match opts.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text | OutputFormat::Tsv => {
            println!(
                "Recorded {}: donor {} offers {}",
                outcome.notification.id, outcome.notification.donor, outcome.notification.organ
            );
            match &outcome.matched_recipient {
                Some(id) => println!("Recipient {id} now has a potential match"),
                None => println!("No recipient is currently searching for this organ"),
            }
        }
    }

    Ok(())
}
