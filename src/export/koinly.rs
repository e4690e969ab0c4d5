use super::{writer_with_header, ExportError, DATE_TIME_FORMAT};
use crate::model::{constants::FIAT_CURRENCY, Transaction};
use serde::Serialize;

pub const HEADER: [&str; 6] = [
    "Koinly Date",
    "Amount",
    "Currency",
    "Net Worth Amount",
    "Net Worth Currency",
    "Description",
];

#[derive(Debug, Serialize)]
struct KoinlyRow<'a> {
    date: String,
    amount: String,
    currency: &'a str,
    net_worth_amount: Option<String>,
    net_worth_currency: Option<&'static str>,
    description: Option<&'a str>,
}

impl<'a> From<&'a Transaction> for KoinlyRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        let net_worth = tx.fiat_value();

        Self {
            date: tx.time.format(DATE_TIME_FORMAT).to_string(),
            amount: tx.signed_amount().to_string(),
            currency: &tx.currency,
            net_worth_currency: net_worth.map(|_| FIAT_CURRENCY),
            net_worth_amount: net_worth.map(|value| value.to_string()),
            description: tx.comment.as_deref(),
        }
    }
}

/// Write the Koinly simple import format. Net worth columns are empty without a valuation.
pub fn write<W: std::io::Write>(transactions: &[Transaction], writer: W) -> Result<(), ExportError> {
    let mut writer = writer_with_header(writer, &HEADER)?;
    for tx in transactions {
        writer.serialize(KoinlyRow::from(tx))?;
    }
    writer.flush()?;

    Ok(())
}
