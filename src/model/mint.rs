use crate::imports::deployer::{read_deployer_txs, DeployerCsvRow, DeployerError};
use crate::model::constants::{BATCH_GROWTH, BATCH_SIZE, BATCH_START_VALUE};
use crate::model::constants::{MINT_EPOCH, PRICE_DATA_CUTOFF, TRACKED_ASSET};
use crate::model::Stats;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Mint value lookup failures. None of these are fatal; they only mean no estimate exists.
#[cfg_attr(test, derive(Eq, PartialEq))]
#[derive(Debug, Error)]
pub enum MintValueError {
    #[error("Mint schedule is empty")]
    NoSchedule,

    #[error("DateTime {0} is after the price data cutoff")]
    AfterCutoff(DateTime<Utc>),

    #[error("DateTime {0} does not follow any mint batch")]
    BeforeFirstBatch(DateTime<Utc>),
}

/// One completed minting tranche.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintBatch {
    pub batch_index: u32,

    /// The batch value applies to transactions strictly after this date.
    pub effective_date: DateTime<Utc>,

    /// USD per unit.
    pub unit_value: Decimal,
}

/// The full mint history, replayed from the deployer address transactions.
///
/// Built once before any lookups and never modified afterward. Batches are ordered by both
/// `batch_index` and `effective_date`.
#[derive(Clone, Debug, Default)]
pub struct MintSchedule {
    batches: Vec<MintBatch>,
}

impl MintSchedule {
    /// An empty schedule. Every lookup returns [`MintValueError::NoSchedule`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the deployer history CSV at `path` and replay it.
    pub fn load(s: &mut Stats, path: impl AsRef<Path>) -> Result<Self, DeployerError> {
        let rows = read_deployer_txs(s, path)?;
        let schedule = Self::replay(rows)?;
        s.set_batches(schedule.len());

        Ok(schedule)
    }

    /// Replay deployer rows, oldest first, into mint batches.
    ///
    /// Rows for other tokens are skipped. When the running total crosses one or more batch
    /// thresholds, each new batch takes the timestamp of the row that crossed it.
    pub fn replay<I>(rows: I) -> Result<Self, DeployerError>
    where
        I: IntoIterator<Item = DeployerCsvRow>,
    {
        let mut batch = MintBatch {
            batch_index: 1,
            effective_date: mint_epoch(),
            unit_value: BATCH_START_VALUE,
        };
        let mut batches = vec![batch.clone()];
        let mut total_minted = Decimal::ZERO;

        for row in rows
            .into_iter()
            .filter(|row| row.token_symbol == TRACKED_ASSET)
        {
            let time = row.time()?;
            total_minted += row.value()?;
            let current_batch = (total_minted / BATCH_SIZE).floor() + Decimal::ONE;
            trace!("Minted {total_minted} at {time}, batch {current_batch}");

            while Decimal::from(batch.batch_index) < current_batch {
                batch = MintBatch {
                    batch_index: batch.batch_index + 1,
                    effective_date: time,
                    unit_value: batch.unit_value * BATCH_GROWTH,
                };
                debug!("New batch: {batch:?}");
                batches.push(batch.clone());
            }
        }

        Ok(Self { batches })
    }

    pub fn batches(&self) -> &[MintBatch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Unit value of the last batch whose effective date is strictly before `date`.
    ///
    /// Dates after the price data cutoff never get an estimate.
    pub fn value_at(&self, date: DateTime<Utc>) -> Result<Decimal, MintValueError> {
        if self.batches.is_empty() {
            return Err(MintValueError::NoSchedule);
        }
        if date > price_data_cutoff() {
            return Err(MintValueError::AfterCutoff(date));
        }

        let applicable = self
            .batches
            .partition_point(|batch| batch.effective_date < date);

        applicable
            .checked_sub(1)
            .map(|index| self.batches[index].unit_value)
            .ok_or(MintValueError::BeforeFirstBatch(date))
    }
}

pub(crate) fn mint_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(MINT_EPOCH)
}

pub(crate) fn price_data_cutoff() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(PRICE_DATA_CUTOFF)
}
