use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use thumbnail_creator::client::{http_client, thumbnail_http_client};
use thumbnail_creator::client::thumbnail_client::ThumbnailResolver;
use thumbnail_creator::config::Config;
use thumbnail_creator::domain::ThumbnailOutcome;
use thumbnail_creator::logging::{logger_setup, LogFormat, DEFAULT_LOG_FILE};
use thumbnail_creator::repository::fedora_repository::FedoraRepository;
use thumbnail_creator::service::ThumbnailCreator;
use tracing::{error, info};

/// Add thumbnail datastreams to repository objects.
#[derive(Debug, Parser)]
#[command(name = "thumbnail-creator", version)]
struct Cli {
    /// Object pids to process, in order.
    #[arg(required = true)]
    pids: Vec<String>,

    /// Write a thumbnail even when the object already has one.
    #[arg(long)]
    force: bool,

    /// Log file, rotated at 5 MB with five backups.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Format of both the log file and console lines.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Default)]
struct Tally {
    already_present: usize,
    unresolved: usize,
    saved: usize,
    save_failed: usize,
    errors: usize,
}

impl Tally {
    fn record(&mut self, outcome: &ThumbnailOutcome) {
        match outcome {
            ThumbnailOutcome::AlreadyPresent => self.already_present += 1,
            ThumbnailOutcome::Unresolved => self.unresolved += 1,
            ThumbnailOutcome::Saved => self.saved += 1,
            ThumbnailOutcome::SaveFailed(_) => self.save_failed += 1,
        }
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(tally) if tally.errors == 0 => process::exit(0),
        Ok(_) => process::exit(1),
        Err(e) => {
            if log::log_enabled!(log::Level::Error) {
                error!("{e:#}");
            } else {
                eprintln!("Error: {e:#}");
            }
            process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<Tally> {
    let cli = Cli::parse();
    let _handle = logger_setup(&cli.log_file, cli.log_format)?;

    let config = Config::from_env()?;
    info!("Using {config:?}");

    let client = http_client().context("could not build http client")?;
    let repository = FedoraRepository::new(
        client,
        &config.fedora_root(),
        config.fedora_user.as_str(),
        config.fedora_pass.as_str(),
    )?;
    let thumbnail_client =
        thumbnail_http_client().context("could not build thumbnail service client")?;
    let resolver = ThumbnailResolver::new(thumbnail_client, &config.thumbnail_server);
    let creator = ThumbnailCreator::new(repository, resolver);

    let mut tally = Tally::default();
    for pid in &cli.pids {
        match creator.create_thumbnail(pid, cli.force).await {
            Ok(outcome) => {
                info!("{pid}: {outcome}");
                tally.record(&outcome);
            }
            Err(e) => {
                error!("{e}");
                tally.errors += 1;
            }
        }
    }

    info!(
        "Processed {} pids: {} saved, {} already present, {} unresolved, {} save failures, {} errors",
        cli.pids.len(),
        tally.saved,
        tally.already_present,
        tally.unresolved,
        tally.save_failed,
        tally.errors
    );
    Ok(tally)
}
