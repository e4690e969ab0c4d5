//! Tax-reporting CSV dialects.
//!
//! Every dialect writes one row per transaction, in the order given, under a fixed header.

use crate::model::Transaction;
use std::ffi::OsString;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub mod canonical;
pub mod koinly;
pub mod taxbit;
pub mod tokentax;

/// Date layout used by the canonical and Koinly dialects.
pub(crate) const DATE_TIME_FORMAT: &str = "%F %T";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV Error")]
    Csv(#[from] csv::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Unknown export dialect `{0}`. Try one of: `canonical`, `koinly`, `tokentax`, `taxbit`")]
pub struct DialectError(String);

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Dialect {
    /// Every parsed field plus the calculated mint value.
    Canonical,

    /// Koinly simple import: signed amounts and net worth.
    Koinly,

    /// TokenTax manual report. The `Type` column must be filled in by hand.
    TokenTax,

    /// TaxBit import. The `Transaction Type` column must be filled in by hand.
    TaxBit,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Self::Canonical, Self::Koinly, Self::TokenTax, Self::TaxBit];

    /// Appended to the input file stem, before `.csv`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Canonical => "",
            Self::Koinly => "-Koinly",
            Self::TokenTax => "-TokenTax",
            Self::TaxBit => "-TaxBit",
        }
    }

    /// The output path that sits next to `input`, e.g. `log.txt` -> `log-Koinly.csv`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = OsString::from(input.with_extension(""));
        name.push(self.suffix());
        name.push(".csv");

        PathBuf::from(name)
    }

    /// Columns that are left blank for the user to classify.
    pub fn manual_columns(&self) -> Option<&'static str> {
        match self {
            Self::Canonical | Self::Koinly => None,
            Self::TokenTax => Some("Type"),
            Self::TaxBit => Some("Transaction Type"),
        }
    }

    pub fn write<W: std::io::Write>(
        &self,
        transactions: &[Transaction],
        writer: W,
    ) -> Result<(), ExportError> {
        match self {
            Self::Canonical => canonical::write(transactions, writer),
            Self::Koinly => koinly::write(transactions, writer),
            Self::TokenTax => tokentax::write(transactions, writer),
            Self::TaxBit => taxbit::write(transactions, writer),
        }
    }

    /// Render the whole file in memory.
    pub fn render(&self, transactions: &[Transaction]) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write(transactions, &mut buffer)?;

        Ok(buffer)
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Canonical => "canonical",
            Self::Koinly => "koinly",
            Self::TokenTax => "tokentax",
            Self::TaxBit => "taxbit",
        })
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "koinly" => Ok(Self::Koinly),
            "tokentax" => Ok(Self::TokenTax),
            "taxbit" => Ok(Self::TaxBit),
            _ => Err(DialectError(s.to_string())),
        }
    }
}

/// Start a CSV writer and emit `header`, so empty exports still have one.
pub(crate) fn writer_with_header<W: std::io::Write>(
    writer: W,
    header: &[&str],
) -> Result<csv::Writer<W>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(header)?;

    Ok(writer)
}
