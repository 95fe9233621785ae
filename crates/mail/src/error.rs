//! Errors that end a counting run

use std::path::PathBuf;

/// A failure that aborts the whole run
///
/// There is no partial-success mode: the first error stops pagination and
/// fetching, and no report is produced.
#[derive(Debug, thiserror::Error)]
pub enum CountError {
    /// The OAuth client credentials file could not be found
    #[error("credentials file not found: {}", path.display())]
    ConfigurationMissing { path: PathBuf },

    /// The credentials file exists but could not be read or parsed
    ///
    /// Displays the whole context chain itself, so it reports no source.
    #[error("{0:#}")]
    InvalidConfiguration(anyhow::Error),

    /// A listing or fetch call to the mail API failed
    #[error("{0:#}")]
    RemoteCall(anyhow::Error),

    /// The fetch thread pool could not be built
    #[error("failed to start fetch workers: {0}")]
    WorkerPool(#[source] rayon::ThreadPoolBuildError),

    /// The progress line thread could not be started
    #[error("failed to start progress reporter: {0}")]
    Progress(#[source] std::io::Error),
}

impl CountError {
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, CountError::ConfigurationMissing { .. })
    }
}
