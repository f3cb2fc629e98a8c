//! Service configuration, read from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ADDR_VAR: &str = "LEDGER_ADDR";
pub const ACCOUNTS_FILE_VAR: &str = "LEDGER_ACCOUNTS_FILE";
pub const ACCOUNTS_URL_VAR: &str = "LEDGER_ACCOUNTS_URL";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.json";

/// **The service configuration**
///
/// - `addr`: the address to listen on, from `LEDGER_ADDR`;
/// - `accounts_file`: the JSON file with the initial accounts, from `LEDGER_ACCOUNTS_FILE`;
/// - `accounts_url`: if set, the accounts file is downloaded from here first,
///   from `LEDGER_ACCOUNTS_URL`.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub accounts_file: PathBuf,
    pub accounts_url: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads the configuration through `var`, which maps a variable name to its value.
    ///
    /// Blank values are treated as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        Config {
            addr: get_addr(var(ADDR_VAR)),
            accounts_file: var(ACCOUNTS_FILE_VAR)
                .unwrap_or_else(|| DEFAULT_ACCOUNTS_FILE.to_string())
                .into(),
            accounts_url: var(ACCOUNTS_URL_VAR),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

/// **Get the listening address**
///
/// Tries to parse the provided value.
/// If there is none, or it can't be parsed, falls back to [`DEFAULT_ADDR`].
fn get_addr(addr: Option<String>) -> SocketAddr {
    let default = || {
        DEFAULT_ADDR
            .parse()
            .expect("The default address is a valid socket address.")
    };

    match addr {
        None => default(),
        Some(addr) => addr.trim().parse().unwrap_or_else(|_| {
            log::warn!(
                "Provided address \"{}\" could not be parsed; using default: {}",
                addr,
                DEFAULT_ADDR
            );
            default()
        }),
    }
}
