//! OAuth client credentials for Gmail API access
//!
//! The credentials file is the JSON downloaded from Google Cloud Console
//! ("installed" or "web" application). It is looked up in this order:
//! 1. An explicit path given on the command line
//! 2. `credentials.json` in the working directory
//! 3. `credentials.json` in the spamtally config directory

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::CountError;

/// Credentials filename, both in the working directory and config directory
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// OAuth credentials for Gmail API access
#[derive(Debug, Clone)]
pub struct GmailCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Google Cloud Console credential file format
#[derive(Deserialize)]
struct GoogleCredentialFile {
    installed: Option<InstalledCredentials>,
    web: Option<InstalledCredentials>,
}

#[derive(Deserialize)]
struct InstalledCredentials {
    client_id: String,
    client_secret: String,
}

impl GmailCredentials {
    /// Candidate credential file locations, highest priority first
    pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
        match explicit {
            // An explicit path is the only candidate; never fall back silently
            Some(path) => vec![path.to_path_buf()],
            None => std::iter::once(PathBuf::from(CREDENTIALS_FILE))
                .chain(config::config_path(CREDENTIALS_FILE))
                .collect(),
        }
    }

    /// Resolve the first existing credentials file
    ///
    /// Returns [`CountError::ConfigurationMissing`] naming the first
    /// candidate when none exists.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, CountError> {
        let candidates = Self::candidate_paths(explicit);
        if let Some(found) = candidates.iter().find(|p| p.exists()) {
            return Ok(found.clone());
        }
        let path = candidates
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from(CREDENTIALS_FILE));
        Err(CountError::ConfigurationMissing { path })
    }

    /// Locate and load credentials
    ///
    /// A missing file is a [`CountError::ConfigurationMissing`]; a file that
    /// exists but cannot be parsed is a [`CountError::InvalidConfiguration`].
    pub fn load(explicit: Option<&Path>) -> Result<Self, CountError> {
        let path = Self::locate(explicit)?;
        Self::from_file(&path).map_err(CountError::InvalidConfiguration)
    }

    /// Load credentials from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let creds: GoogleCredentialFile = config::load_json_file(path)?;
        Self::from_credential_file(creds)
    }

    /// Parse credentials from JSON string (Google Cloud Console format)
    pub fn from_json(json: &str) -> Result<Self> {
        let creds: GoogleCredentialFile =
            serde_json::from_str(json).context("Failed to parse credentials JSON")?;
        Self::from_credential_file(creds)
    }

    fn from_credential_file(creds: GoogleCredentialFile) -> Result<Self> {
        let installed = creds
            .installed
            .or(creds.web)
            .context("Credentials file missing 'installed' or 'web' section")?;

        Ok(Self {
            client_id: installed.client_id,
            client_secret: installed.client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_installed_credentials() {
        let json = r#"{
            "installed": {
                "client_id": "test-client-id.apps.googleusercontent.com",
                "client_secret": "test-secret",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token"
            }
        }"#;

        let creds = GmailCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "test-client-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "test-secret");
    }

    #[test]
    fn test_parse_web_credentials() {
        let json = r#"{
            "web": {
                "client_id": "web-client-id.apps.googleusercontent.com",
                "client_secret": "web-secret"
            }
        }"#;

        let creds = GmailCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "web-client-id.apps.googleusercontent.com");
    }

    #[test]
    fn test_invalid_json() {
        assert!(GmailCredentials::from_json(r#"{ "other": {} }"#).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_configuration_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");

        let err = GmailCredentials::locate(Some(&path)).unwrap_err();
        match err {
            CountError::ConfigurationMissing { path: missing } => assert_eq!(missing, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.json");
        std::fs::write(
            &path,
            r#"{"installed": {"client_id": "cid", "client_secret": "cs"}}"#,
        )
        .unwrap();

        let creds = GmailCredentials::load(Some(&path)).unwrap();
        assert_eq!(creds.client_id, "cid");
        assert_eq!(creds.client_secret, "cs");
    }

    #[test]
    fn test_load_malformed_file_is_invalid_configuration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.json");
        std::fs::write(&path, r#"{"other": {}}"#).unwrap();

        let err = GmailCredentials::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CountError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_default_candidates_start_with_working_directory() {
        let candidates = GmailCredentials::candidate_paths(None);
        assert_eq!(candidates[0], PathBuf::from(CREDENTIALS_FILE));
    }
}
