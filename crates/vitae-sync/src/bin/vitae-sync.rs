//! vitae-sync binary
//!
//! One-shot bibliography sync: fetch works from OpenAlex, reconcile against
//! the manual bibliography files, regenerate the BibTeX and web JSON
//! outputs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use vitae_sync::export::{project, write_outputs};
use vitae_sync::sources::openalex;
use vitae_sync::{reconcile, ManualKeySet, SyncConfig, SyncError};

/// Sync a researcher's OpenAlex bibliography into local output files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "vitae.toml")]
    config: PathBuf,

    /// ORCID iD, overriding the config file
    #[arg(long)]
    orcid: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), SyncError> {
    let mut config = if args.config.exists() {
        SyncConfig::load(&args.config)?
    } else {
        SyncConfig::default()
    };
    if let Some(orcid) = args.orcid {
        config.orcid = orcid;
    }
    config.validate()?;

    let manual = ManualKeySet::load(&config.manual_bibs)?;
    info!("{} manual keys loaded", manual.len());

    let works = openalex::fetch_works(&config).await?;
    let reconciled = reconcile(works, &manual);
    info!(
        "reconciled to {} publications, {} working papers",
        reconciled.publications.len(),
        reconciled.working_papers.len()
    );

    let projection = project(&reconciled);
    let summary = write_outputs(&projection, &config)?;

    println!(
        "Wrote {} ({})",
        config.out_publications.display(),
        summary.publications
    );
    println!(
        "Wrote {} ({})",
        config.out_working_papers.display(),
        summary.working_papers
    );
    println!(
        "Wrote {} ({})",
        config.out_web_json.display(),
        summary.web_records
    );

    Ok(())
}
