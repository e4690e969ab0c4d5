use super::{writer_with_header, ExportError};
use crate::model::constants::WALLET_NAME;
use crate::model::{Transaction, TxType};
use serde::Serialize;

pub const HEADER: [&str; 11] = [
    "Type",
    "BuyAmount",
    "BuyCurrency",
    "SellAmount",
    "SellCurrency",
    "FeeAmount",
    "FeeCurrency",
    "Exchange",
    "Group",
    "Comment",
    "Date",
];

const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

#[derive(Debug, Serialize)]
struct TokenTaxRow<'a> {
    // Trade, Deposit, Income, Withdrawal, Spend, Gift, ... chosen by the user.
    tx_type: &'static str,
    buy_amount: Option<String>,
    buy_currency: Option<&'a str>,
    sell_amount: Option<String>,
    sell_currency: Option<&'a str>,
    fee_amount: &'static str,
    fee_currency: &'static str,
    exchange: &'static str,
    group: &'static str,
    comment: Option<&'a str>,
    date: String,
}

impl<'a> From<&'a Transaction> for TokenTaxRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        let (buy, sell) = match tx.tx_type {
            TxType::Receive => (Some(tx), None),
            TxType::Send => (None, Some(tx)),
        };

        Self {
            tx_type: "",
            buy_amount: buy.map(|tx| tx.amount.to_string()),
            buy_currency: buy.map(|tx| tx.currency.as_str()),
            sell_amount: sell.map(|tx| tx.amount.to_string()),
            sell_currency: sell.map(|tx| tx.currency.as_str()),
            fee_amount: "",
            fee_currency: "",
            exchange: WALLET_NAME,
            group: "",
            comment: tx.comment.as_deref(),
            date: tx.time.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Write the TokenTax manual format. Receives are buys, sends are sells; the `Type` column is
/// left blank.
pub fn write<W: std::io::Write>(transactions: &[Transaction], writer: W) -> Result<(), ExportError> {
    let mut writer = writer_with_header(writer, &HEADER)?;
    for tx in transactions {
        writer.serialize(TokenTaxRow::from(tx))?;
    }
    writer.flush()?;

    Ok(())
}
