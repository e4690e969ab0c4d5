//! Fixed parameters of the NCR mint schedule and the exported files.

use rust_decimal::Decimal;

/// The only token counted when replaying the deployer history.
pub const TRACKED_ASSET: &str = "NCR";

/// Fiat label attached to computed values.
pub const FIAT_CURRENCY: &str = "USD";

/// Wallet name written into dialects that ask where a transaction took place.
pub const WALLET_NAME: &str = "Neos";

/// Start of minting, 2019-02-01T07:00:00Z. Effective date of batch 1.
pub const MINT_EPOCH: i64 = 1_549_004_400;

/// Units minted per batch.
pub const BATCH_SIZE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Batch 1 unit value, 0.06 USD.
pub const BATCH_START_VALUE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Each batch is worth 1.25% more than the one before it.
pub const BATCH_GROWTH: Decimal = Decimal::from_parts(10_125, 0, 0, false, 4);

/// External price data exists from 2021-11-01T00:00:00Z onward. No estimates after this point.
pub const PRICE_DATA_CUTOFF: i64 = 1_635_724_800;

/// Deployer history location, relative to the working directory.
pub const DEFAULT_PATH_DEPLOYER_TXS: &str = "NCR Deployer Transactions.csv";

/// Timestamp layout used by the wallet log, e.g. "Monday, 04 March 2019 13:45:02".
pub const LOG_TIME_FORMAT: &str = "%A, %d %B %Y %H:%M:%S";

/// The part of [`LOG_TIME_FORMAT`] after the weekday. Only this part is parsed.
pub const LOG_DATE_TIME_FORMAT: &str = "%d %B %Y %H:%M:%S";

#[cfg(test)]
pub(crate) const FIXTURE_LEDGER_LOG: &str = "./fixtures/wallet-log.txt";

#[cfg(test)]
pub(crate) const FIXTURE_DEPLOYER_TXS: &str = "./fixtures/deployer-txs.csv";
