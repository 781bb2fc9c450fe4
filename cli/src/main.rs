//! clinicpdf CLI - owner record PDF export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use clinicpdf::{sample_owner, OwnerRecord, PdfExporter};

#[derive(Parser)]
#[command(name = "clinicpdf")]
#[command(version)]
#[command(about = "Export veterinary-clinic owner records as PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an owner record (JSON) to a PDF file
    Export {
        /// Input owner record as JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (owner_export.pdf if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Load the clinic logo from this file instead of the bundled one
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Render without a logo
        #[arg(long, conflicts_with = "logo")]
        no_logo: bool,
    },

    /// Export the built-in sample record
    Sample {
        /// Output PDF file (owner_export.pdf if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate an owner record and print a summary
    Info {
        /// Input owner record as JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            logo,
            no_logo,
        } => cmd_export(&input, output.as_deref(), logo, no_logo),
        Commands::Sample { output } => cmd_sample(output.as_deref()),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    logo: Option<PathBuf>,
    no_logo: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let owner = read_owner(input)?;

    let mut exporter = PdfExporter::new();
    if let Some(path) = logo {
        exporter = exporter.with_logo_path(path);
    }
    if no_logo {
        exporter = exporter.without_logo();
    }

    let pdf = exporter.render(&owner)?;
    let output = output.map(Path::to_path_buf).unwrap_or_else(default_output);
    log::debug!("writing {} bytes to {}", pdf.len(), output.display());
    fs::write(&output, &pdf)?;

    println!(
        "{} exported owner {} to {} ({} bytes)",
        "Done:".green().bold(),
        owner.id,
        output.display(),
        pdf.len()
    );
    Ok(())
}

fn cmd_sample(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let owner = sample_owner();
    let pdf = PdfExporter::new().render(&owner)?;
    let output = output.map(Path::to_path_buf).unwrap_or_else(default_output);
    fs::write(&output, &pdf)?;

    println!(
        "{} exported sample record ({}) to {}",
        "Done:".green().bold(),
        owner.full_name(),
        output.display()
    );
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let owner = read_owner(input)?;
    owner.validate()?;

    println!("{}", "Owner Record".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Id".bold(), owner.id);
    println!("{}: {}", "Name".bold(), owner.full_name());
    println!("{}: {}", "Address".bold(), owner.address);
    println!("{}: {}", "City".bold(), owner.city);
    Ok(())
}

fn read_owner(path: &Path) -> Result<OwnerRecord, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn default_output() -> PathBuf {
    PathBuf::from("owner_export.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_read_owner_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"id":3,"first_name":"Eduardo","last_name":"Rodriquez","address":"2693 Commerce St.","city":"McFarland"}"#,
        )
        .unwrap();

        let owner = read_owner(file.path()).unwrap();
        assert_eq!(owner.id, 3);
        assert_eq!(owner.full_name(), "Eduardo Rodriquez");
    }

    #[test]
    fn test_read_owner_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(read_owner(file.path()).is_err());
    }
}
