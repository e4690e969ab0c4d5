use super::{writer_with_header, ExportError};
use crate::model::{Transaction, TxType};
use serde::Serialize;

pub const HEADER: [&str; 12] = [
    "Date and Time",
    "Transaction Type",
    "Sent Quantity",
    "Sent Currency",
    "Sending Source",
    "Received Quantity",
    "Received Currency",
    "Receiving Destination",
    "Fee",
    "Fee Currency",
    "Exchange Transaction ID",
    "Blockchain Transaction Hash",
];

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Serialize)]
struct TaxBitRow<'a> {
    date: String,
    // Buy, Sale, Transfer In, Transfer Out, Income, Expense, ... chosen by the user.
    tx_type: &'static str,
    sent_quantity: Option<String>,
    sent_currency: Option<&'a str>,
    sending_source: Option<&'a str>,
    received_quantity: Option<String>,
    received_currency: Option<&'a str>,
    receiving_destination: Option<&'a str>,
    fee: &'static str,
    fee_currency: &'static str,
    exchange_tx_id: &'static str,
    blockchain_tx_hash: &'static str,
}

impl<'a> From<&'a Transaction> for TaxBitRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        let (sent, received) = match tx.tx_type {
            TxType::Send => (Some(tx), None),
            TxType::Receive => (None, Some(tx)),
        };

        Self {
            date: tx.time.format(DATE_FORMAT).to_string(),
            tx_type: "",
            sent_quantity: sent.map(|tx| tx.amount.to_string()),
            sent_currency: sent.map(|tx| tx.currency.as_str()),
            sending_source: sent.map(|tx| tx.counterparty.as_str()),
            received_quantity: received.map(|tx| tx.amount.to_string()),
            received_currency: received.map(|tx| tx.currency.as_str()),
            receiving_destination: received.map(|tx| tx.counterparty.as_str()),
            fee: "",
            fee_currency: "",
            exchange_tx_id: "",
            blockchain_tx_hash: "",
        }
    }
}

/// Write the TaxBit import format. Sends fill the sent columns, receives the received columns;
/// the counterparty goes into the source or destination label. `Transaction Type` is left blank.
pub fn write<W: std::io::Write>(transactions: &[Transaction], writer: W) -> Result<(), ExportError> {
    let mut writer = writer_with_header(writer, &HEADER)?;
    for tx in transactions {
        writer.serialize(TaxBitRow::from(tx))?;
    }
    writer.flush()?;

    Ok(())
}
