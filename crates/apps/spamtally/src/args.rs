use clap::Parser;
use log::warn;
use mail::CountOptions;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "spamtally",
    about = "Count the messages in your Gmail spam folder per day",
    version,
    long_about = None
)]
pub struct Args {
    /// Only count messages from the last DAYS days
    #[arg(allow_negative_numbers = true)]
    pub days: Option<String>,

    /// Path to the OAuth client credentials JSON from Google Cloud Console
    #[arg(short, long)]
    pub credentials: Option<PathBuf>,

    /// Maximum number of messages fetched at once
    #[arg(long, default_value_t = CountOptions::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Number of message IDs requested per listing page (1-500)
    #[arg(long, default_value_t = CountOptions::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Progress line refresh interval in milliseconds
    #[arg(long, default_value_t = 100)]
    pub progress_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parsed day limit; anything that isn't a non-negative integer means
    /// no limit
    pub fn day_limit(&self) -> Option<u32> {
        let raw = self.days.as_deref()?;
        match raw.trim().parse() {
            Ok(days) => Some(days),
            Err(_) => {
                warn!("Ignoring day limit {:?}: not a non-negative integer", raw);
                None
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.concurrency == 0 {
            anyhow::bail!("--concurrency must be greater than 0");
        }
        if !(1..=mail::GmailClient::MAX_PAGE_SIZE).contains(&self.page_size) {
            anyhow::bail!(
                "--page-size must be between 1 and {}",
                mail::GmailClient::MAX_PAGE_SIZE
            );
        }
        if self.progress_ms == 0 {
            anyhow::bail!("--progress-ms must be greater than 0");
        }
        Ok(())
    }

    pub fn count_options(&self) -> CountOptions {
        CountOptions {
            concurrency: self.concurrency,
            page_size: self.page_size,
            progress_interval: Duration::from_millis(self.progress_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("spamtally").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.day_limit(), None);
        assert_eq!(args.count_options(), CountOptions::default());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_day_limit() {
        assert_eq!(parse(&["7"]).day_limit(), Some(7));
        assert_eq!(parse(&["0"]).day_limit(), Some(0));
    }

    #[test]
    fn test_unparseable_day_limit_means_no_limit() {
        assert_eq!(parse(&["week"]).day_limit(), None);
        assert_eq!(parse(&["-3"]).day_limit(), None);
    }

    #[test]
    fn test_rejects_bad_tuning() {
        assert!(parse(&["--concurrency", "0"]).validate().is_err());
        assert!(parse(&["--page-size", "501"]).validate().is_err());
        assert!(parse(&["--page-size", "0"]).validate().is_err());
        assert!(parse(&["--progress-ms", "0"]).validate().is_err());
    }

    #[test]
    fn test_tuning_flags() {
        let args = parse(&["3", "--concurrency", "5", "--page-size", "100", "-c", "creds.json"]);
        let options = args.count_options();
        assert_eq!(options.concurrency, 5);
        assert_eq!(options.page_size, 100);
        assert_eq!(args.credentials, Some(PathBuf::from("creds.json")));
        assert_eq!(args.day_limit(), Some(3));
    }
}
