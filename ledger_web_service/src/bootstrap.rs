//! Loading the initial accounts
//!
//! The accounts come from a JSON file: an array of `{"id", "name", "balance"}` objects,
//! with each balance given as a decimal string. The file can optionally be downloaded
//! from a URL first.
//!
//! Failures here abort the startup; they never happen while serving requests.

use crate::config::Config;
use ledger_common::errors::LedgerError;
use ledger_common::{Account, Ledger};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to download the accounts file: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Failed to download the accounts file: the server responded with {0}")]
    DownloadStatus(reqwest::StatusCode),

    #[error("Failed to access the accounts file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse the accounts data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to build the ledger: {0}")]
    Ledger(#[from] LedgerError),
}

/// **Downloads the accounts file from `url` and saves it to `path`**
///
/// # Errors
/// - Request failed, `BootstrapError::Download`;
/// - Non-success response status, `BootstrapError::DownloadStatus`;
/// - The file can't be written, `BootstrapError::Io`.
pub async fn download_accounts(url: &str, path: &Path) -> Result<(), BootstrapError> {
    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(BootstrapError::DownloadStatus(status));
    }

    let body = response.bytes().await?;
    tokio::fs::write(path, &body)
        .await
        .map_err(|source| BootstrapError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

/// **Parses the accounts data**
///
/// Balances are rounded to two decimals; negative or non-numeric balances are rejected.
///
/// # Errors
/// - Invalid JSON, or a record of the wrong shape, `BootstrapError::Parse`
pub fn parse_accounts(data: &[u8]) -> Result<Vec<Account>, BootstrapError> {
    Ok(serde_json::from_slice(data)?)
}

/// **Builds the ledger as configured**
///
/// Downloads the accounts file first if a URL is configured,
/// then reads and parses it.
///
/// # Errors
/// - Any download, I/O or parsing failure;
/// - Duplicate account IDs, `BootstrapError::Ledger`.
pub async fn load_ledger(config: &Config) -> Result<Ledger, BootstrapError> {
    let path = &config.accounts_file;

    if let Some(url) = &config.accounts_url {
        log::info!("Downloading the accounts file from {}", url);
        download_accounts(url, path).await?;
        log::info!("File downloaded successfully: {}", path.display());
    }

    let data = tokio::fs::read(path)
        .await
        .map_err(|source| BootstrapError::Io {
            path: path.clone(),
            source,
        })?;

    let ledger = Ledger::new(parse_accounts(&data)?)?;

    log::info!(
        "Accounts ingestion completed: {} accounts, {} in total. Ready to make transfers.",
        ledger.len()?,
        ledger.total_balance()?
    );

    Ok(ledger)
}
