//! Run configuration from environment variables.

use crate::export::{Dialect, DialectError};
use crate::model::constants::DEFAULT_PATH_DEPLOYER_TXS;
use crate::model::ledgers::parsed::{MalformedLines, MalformedLinesError};
use std::{env, path::PathBuf};
use thiserror::Error;

/// Path of the deployer history CSV.
pub const ENV_DEPLOYER_TXS: &str = "DEPLOYER_TXS";

/// `abort` or `skip`.
pub const ENV_MALFORMED_LINES: &str = "MALFORMED_LINES";

/// Comma separated dialect names.
pub const ENV_EXPORT_DIALECTS: &str = "EXPORT_DIALECTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid MALFORMED_LINES")]
    MalformedLines(#[from] MalformedLinesError),

    #[error("Invalid EXPORT_DIALECTS")]
    Dialect(#[from] DialectError),

    #[error("EXPORT_DIALECTS does not name any dialect")]
    NoDialects,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub deployer_txs: PathBuf,
    pub malformed_lines: MalformedLines,

    /// Written in this order, without duplicates.
    pub dialects: Vec<Dialect>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deployer_txs: PathBuf::from(DEFAULT_PATH_DEPLOYER_TXS),
            malformed_lines: MalformedLines::default(),
            dialects: vec![Dialect::Canonical, Dialect::Koinly],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build a config from a variable lookup. Unset variables keep their defaults.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = var(ENV_DEPLOYER_TXS) {
            config.deployer_txs = PathBuf::from(path);
        }
        if let Some(policy) = var(ENV_MALFORMED_LINES) {
            config.malformed_lines = policy.parse()?;
        }
        if let Some(names) = var(ENV_EXPORT_DIALECTS) {
            let mut dialects: Vec<Dialect> = Vec::new();
            for name in names.split(',').filter(|name| !name.trim().is_empty()) {
                let dialect: Dialect = name.parse()?;
                if !dialects.contains(&dialect) {
                    dialects.push(dialect);
                }
            }
            if dialects.is_empty() {
                return Err(ConfigError::NoDialects);
            }
            config.dialects = dialects;
        }

        Ok(config)
    }
}
