//! Classification of raw wallet log lines.
//!
//! Lines look like:
//!
//! ```text
//! [7] SEND 12.5 NCR to Alice. Balance: 87.5. Timestamp: Monday, 04 March 2019 13:45:02.
//! Comment: gift for birthday
//! ```

use crate::model::constants::LOG_DATE_TIME_FORMAT;
use crate::model::{Transaction, TxType};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::num::ParseIntError;
use thiserror::Error;

const COMMENT_PREFIX: &str = "Comment: ";
const BALANCE_MARKER: &str = ". Balance:";
const TIMESTAMP_MARKER: &str = ". Timestamp:";
const TIMESTAMP_VALUE_MARKER: &str = ". Timestamp: ";
const WEEKDAY_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum ParseLineError {
    #[error("Missing `{0}` marker")]
    MissingMarker(&'static str),

    #[error("Missing {0} field")]
    MissingField(&'static str),

    #[error("Invalid transaction ID `{0}`")]
    Id(String, #[source] ParseIntError),

    #[error("Invalid {0} `{1}`")]
    Number(&'static str, String, #[source] rust_decimal::Error),

    #[error("Negative amount `{0}`")]
    NegativeAmount(Decimal),

    #[error("Invalid timestamp `{0}`")]
    Timestamp(String, #[source] chrono::ParseError),
}

/// A single line of the wallet log. Anything that is not a transfer or a comment is `Ignored`.
#[derive(Clone, Debug, PartialEq)]
pub enum LedgerLine {
    Send(Transaction),
    Receive(Transaction),
    Comment(String),
    Ignored,
}

impl LedgerLine {
    /// Classify one line without looking at any other line.
    ///
    /// Transfer lines must contain every field marker; a missing marker or a field that does not
    /// parse is an error rather than an `Ignored` line.
    pub fn parse(line: &str) -> Result<Self, ParseLineError> {
        if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
            return Ok(Self::Comment(comment.trim().to_string()));
        }

        Ok(match transfer_type(line) {
            Some(TxType::Send) => Self::Send(parse_transfer(line, TxType::Send)?),
            Some(TxType::Receive) => Self::Receive(parse_transfer(line, TxType::Receive)?),
            None => Self::Ignored,
        })
    }
}

/// Transfer lines start with `[` and carry the keyword as their second token.
fn transfer_type(line: &str) -> Option<TxType> {
    if !line.starts_with('[') {
        return None;
    }

    match line.split_whitespace().nth(1) {
        Some("SEND") => Some(TxType::Send),
        Some("RECEIVE") => Some(TxType::Receive),
        _ => None,
    }
}

fn parse_transfer(line: &str, tx_type: TxType) -> Result<Transaction, ParseLineError> {
    let mut tokens = line.split_whitespace();

    let id = tokens.next().ok_or(ParseLineError::MissingField("ID"))?;
    let id = id.strip_prefix('[').unwrap_or(id);
    let id = id.strip_suffix(']').unwrap_or(id);
    let id = id
        .parse()
        .map_err(|err| ParseLineError::Id(id.to_string(), err))?;

    // Skip the keyword
    tokens.next();

    let amount = tokens.next().ok_or(ParseLineError::MissingField("amount"))?;
    let amount = parse_decimal("amount", amount)?;
    if amount.is_sign_negative() {
        return Err(ParseLineError::NegativeAmount(amount));
    }

    let currency = tokens
        .next()
        .ok_or(ParseLineError::MissingField("currency"))?
        .to_string();

    let counterparty = between(line, tx_type.counterparty_marker(), BALANCE_MARKER)?.to_string();
    let balance_after = parse_decimal("balance", between(line, BALANCE_MARKER, TIMESTAMP_MARKER)?)?;

    // The timestamp runs to the period that ends the line.
    let start = line
        .find(TIMESTAMP_VALUE_MARKER)
        .ok_or(ParseLineError::MissingMarker(TIMESTAMP_VALUE_MARKER))?;
    let time = line[start + TIMESTAMP_VALUE_MARKER.len()..]
        .trim_end()
        .strip_suffix('.')
        .ok_or(ParseLineError::MissingMarker("."))?;
    let time = parse_log_time(time)?;

    Ok(Transaction {
        id,
        tx_type,
        amount,
        currency,
        counterparty,
        balance_after,
        time,
        comment: None,
        valuation: None,
    })
}

/// Parse "Monday, 04 March 2019 13:45:02". The weekday name must be present but is not checked
/// against the date.
fn parse_log_time(text: &str) -> Result<DateTime<Utc>, ParseLineError> {
    let (weekday, date_time) = text
        .split_once(WEEKDAY_SEPARATOR)
        .ok_or(ParseLineError::MissingMarker(WEEKDAY_SEPARATOR))?;
    if weekday.trim().is_empty() {
        return Err(ParseLineError::MissingField("weekday"));
    }

    NaiveDateTime::parse_from_str(date_time, LOG_DATE_TIME_FORMAT)
        .map(|time| time.and_utc())
        .map_err(|err| ParseLineError::Timestamp(text.to_string(), err))
}

/// The text between the first `start` marker and the next `end` marker after it.
fn between<'a>(
    line: &'a str,
    start: &'static str,
    end: &'static str,
) -> Result<&'a str, ParseLineError> {
    let from = line
        .find(start)
        .ok_or(ParseLineError::MissingMarker(start))?
        + start.len();
    let to = line[from..]
        .find(end)
        .ok_or(ParseLineError::MissingMarker(end))?
        + from;

    Ok(&line[from..to])
}

fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, ParseLineError> {
    let text = text.trim();

    text.parse()
        .map_err(|err| ParseLineError::Number(field, text.to_string(), err))
}
