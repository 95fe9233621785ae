//! spamtally - per-day counts of the Gmail spam folder
//!
//! Authenticates, walks the spam listing with a live progress line, and
//! prints one row per local calendar day followed by the total.

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use mail::{CountError, GmailAuth, GmailClient, GmailCredentials, RunConfig, render_report};
use std::io::Write;
use std::process::ExitCode;

mod args;

use args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    // Every failure ends up here; nothing below retries or recovers
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The single line printed to stderr when a run fails
fn failure_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<CountError>() {
        Some(CountError::ConfigurationMissing { path }) => format!(
            "Error: {} not found. Download OAuth client credentials from Google \
             Cloud Console and save them there, or pass --credentials <path>.",
            path.display()
        ),
        _ => format!("An error occurred: {:#}", e),
    }
}

fn run(args: &Args) -> Result<()> {
    args.validate()?;

    if let Err(e) = config::ensure_config_dir() {
        error!("Failed to initialize config directory: {:#}", e);
    }

    let run_config = RunConfig::new(args.day_limit());
    let options = args.count_options();
    match run_config.cutoff {
        Some(cutoff) => info!("Counting spam received since {}", cutoff),
        None => info!("Counting all spam"),
    }

    let credentials = GmailCredentials::load(args.credentials.as_deref())?;
    let auth = GmailAuth::new(credentials)?;
    let client = GmailClient::connect(&auth).map_err(CountError::RemoteCall)?;

    let table = mail::run(&client, &run_config, &options, std::io::stdout())?;

    let mut stdout = std::io::stdout().lock();
    render_report(&table, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
