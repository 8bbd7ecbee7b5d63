use crate::cli::{GlobalOptions, OutputFormat};

/// Execute hospitals command
///
/// # Errors
///
/// Returns an error if a custom directory file cannot be loaded.
pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let directory = opts.load_hospitals()?;

    match opts.format {
        OutputFormat::Text => {
            println!("{:<6} {:<40} {:<12} Contact", "ID", "Name", "City");
            println!("{}", "-".repeat(80));
            for h in directory.iter() {
                println!("{:<6} {:<40} {:<12} {}", h.id, h.name, h.city, h.contact);
            }
            println!();
            println!("Total: {} hospital(s)", directory.len());
        }
        OutputFormat::Json => {
            let hospitals: Vec<_> = directory.iter().collect();
            println!("{}", serde_json::to_string_pretty(&hospitals)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tcity\tcontact");
            for h in directory.iter() {
                println!("{}\t{}\t{}\t{}", h.id, h.name, h.city, h.contact);
            }
        }
    }

    Ok(())
}
