//! Command-line interface for organ-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **donor**: pledge organs, withdraw an organ, list donors
//! - **recipient**: register, list, change urgency, remove, simulate
//! - **match**: run the matching engine over the current waitlist
//! - **score**: show a recipient's priority breakdown
//! - **interest**: record a donor's offer of one organ and auto-match
//! - **notifications**: list or clear interest notifications
//! - **hospitals**: list the hospital directory
//! - **serve**: start the JSON API server
//!
//! ## Usage
//!
//! ```text
//! # Pledge two organs
//! organ-match donor pledge --name "Asha Rao" --blood-group O- --organ kidney --organ cornea
//!
//! # Waitlist a patient
//! organ-match recipient register --name "Ravi K" --patient-id PT-1001 \
//!     --blood-group A+ --organ kidney --urgency critical --hospital H001
//!
//! # Run matching, JSON output for scripting
//! organ-match match --format json
//!
//! # Start the API
//! organ-match serve --port 8080 --open
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::catalog::hospitals::HospitalDirectory;
use crate::store::buckets::JsonBuckets;
use crate::store::registry::Registry;

pub mod donor;
pub mod hospitals;
pub mod matching;
pub mod notifications;
pub mod recipient;

/// Default directory holding the JSON buckets
pub const DEFAULT_DATA_DIR: &str = ".organ-match";

#[derive(Parser)]
#[command(name = "organ-match")]
#[command(author = "Organ Match Contributors")]
#[command(version)]
#[command(about = "Coordinate organ-donation pledges, waitlists and donor-recipient matching")]
#[command(
    long_about = "organ-match keeps a local record of donor pledges and waitlisted recipients and pairs them.\n\nMatching ranks recipients by urgency and time on the waitlist, then greedily assigns each one the first blood-compatible donor who pledged the needed organ."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the donors, recipients and notifications buckets
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Path to a custom hospital directory file
    #[arg(long, global = true)]
    pub hospitals: Option<PathBuf>,

    /// Evaluate as of this instant (RFC 3339) instead of the current time
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage donor pledges
    Donor(donor::DonorArgs),

    /// Manage the recipient waitlist
    Recipient(recipient::RecipientArgs),

    /// Pair donors with waitlisted recipients
    Match,

    /// Show the priority score of a recipient
    Score(matching::ScoreArgs),

    /// Record a donor's offer of one organ and auto-match a waiting recipient
    Interest(matching::InterestArgs),

    /// Manage interest notifications
    Notifications(notifications::NotificationArgs),

    /// List hospitals in the directory
    Hospitals,

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub format: OutputFormat,
    pub verbose: bool,
    pub data_dir: PathBuf,
    pub hospitals: Option<PathBuf>,
    pub now: Option<DateTime<Utc>>,
}

impl GlobalOptions {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            verbose: cli.verbose,
            data_dir: cli.data_dir.clone(),
            hospitals: cli.hospitals.clone(),
            now: cli.now,
        }
    }

    /// The instant to evaluate scores and timestamps against
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Load the custom hospital directory if given, otherwise the embedded one
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or parsed.
    pub fn load_hospitals(&self) -> anyhow::Result<HospitalDirectory> {
        let directory = if let Some(path) = &self.hospitals {
            HospitalDirectory::load_from_file(path)?
        } else {
            HospitalDirectory::load_embedded()?
        };
        Ok(directory)
    }

    /// Open the registry over the configured data directory
    ///
    /// # Errors
    ///
    /// Returns an error if the hospital directory or any bucket fails to load.
    pub fn open_registry(&self) -> anyhow::Result<Registry> {
        let hospitals = self.load_hospitals()?;
        let registry = Registry::open(JsonBuckets::new(&self.data_dir), hospitals)?;

        if self.verbose {
            eprintln!(
                "Loaded {} donor(s), {} recipient(s) from {}",
                registry.state().donors.len(),
                registry.state().recipients.len(),
                self.data_dir.display()
            );
        }

        Ok(registry)
    }
}
