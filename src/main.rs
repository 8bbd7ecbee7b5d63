use clap::Parser;
use tracing_subscriber::EnvFilter;

use organ_match::cli::{self, GlobalOptions};
use organ_match::web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("organ_match=debug,info")
    } else {
        EnvFilter::new("organ_match=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        cli::Commands::Donor(args) => cli::donor::run(args, &opts)?,
        cli::Commands::Recipient(args) => cli::recipient::run(args, &opts)?,
        cli::Commands::Match => cli::matching::run_match(&opts)?,
        cli::Commands::Score(args) => cli::matching::run_score(args, &opts)?,
        cli::Commands::Interest(args) => cli::matching::run_interest(args, &opts)?,
        cli::Commands::Notifications(args) => cli::notifications::run(args, &opts)?,
        cli::Commands::Hospitals => cli::hospitals::run(&opts)?,
        cli::Commands::Serve(args) => web::server::run(args, &opts)?,
    }

    Ok(())
}
