use crate::model::Stats;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DeployerError {
    #[error("CSV Error")]
    Csv(#[from] csv::Error),

    #[error("Invalid UnixTimestamp `{0}`")]
    Timestamp(String),

    #[error("Invalid Value `{0}`")]
    Value(String, #[source] rust_decimal::Error),
}

/// One row of the deployer address history export. Only the columns needed to replay the mint
/// schedule are read; any others are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct DeployerCsvRow {
    #[serde(rename = "TokenSymbol")]
    pub(crate) token_symbol: String,

    #[serde(rename = "UnixTimestamp")]
    pub(crate) unix_timestamp: String,

    #[serde(rename = "Value")]
    pub(crate) value: String,
}

impl DeployerCsvRow {
    pub(crate) fn time(&self) -> Result<DateTime<Utc>, DeployerError> {
        self.unix_timestamp
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| DeployerError::Timestamp(self.unix_timestamp.clone()))
    }

    /// Transfer value with thousands separators removed.
    pub(crate) fn value(&self) -> Result<Decimal, DeployerError> {
        self.value
            .trim()
            .replace(',', "")
            .parse()
            .map_err(|err| DeployerError::Value(self.value.clone(), err))
    }
}

/// Read the deployer history CSV. Rows must already be sorted oldest first.
pub fn read_deployer_txs(
    s: &mut Stats,
    path: impl AsRef<Path>,
) -> Result<Vec<DeployerCsvRow>, DeployerError> {
    let mut rows = Vec::new();
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    debug!("Parsing deployer rows");
    for result in reader.deserialize() {
        let record: DeployerCsvRow = result?;
        debug!("Deserialized: {record:?}");

        rows.push(record);
        s.inc_deployer_rows();
    }

    Ok(rows)
}
