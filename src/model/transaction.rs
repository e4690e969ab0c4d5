use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Direction of a wallet transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TxType {
    Send,
    Receive,
}

impl TxType {
    /// Keyword used in the wallet log, and in the canonical export.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Send => "SEND",
            Self::Receive => "RECEIVE",
        }
    }

    /// The text between the amount and the counterparty, `" to "` or `" from "`.
    pub(crate) fn counterparty_marker(&self) -> &'static str {
        match self {
            Self::Send => " to ",
            Self::Receive => " from ",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single SEND or RECEIVE event from the wallet log.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub tx_type: TxType,
    pub amount: Decimal,
    pub currency: String,
    pub counterparty: String,
    pub balance_after: Decimal,
    pub time: DateTime<Utc>,

    /// Free text from a `Comment: ` line directly below the transaction.
    pub comment: Option<String>,

    /// Estimated fiat unit value, set by the valuation step.
    pub valuation: Option<Decimal>,
}

impl Transaction {
    /// The amount as it affects the wallet balance: negative for sends. Zero is never signed.
    pub fn signed_amount(&self) -> Decimal {
        match self.tx_type {
            TxType::Send if !self.amount.is_zero() => -self.amount,
            _ => self.amount,
        }
    }

    /// Fiat equivalent of the transfer, when a valuation is known.
    pub fn fiat_value(&self) -> Option<Decimal> {
        self.valuation
            .map(|unit_value| (self.signed_amount() * unit_value).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn tx(tx_type: TxType, valuation: Option<Decimal>) -> Transaction {
        Transaction {
            id: 1,
            tx_type,
            amount: "12.5".parse().unwrap(),
            currency: "NCR".to_string(),
            counterparty: "Alice".to_string(),
            balance_after: "87.5".parse().unwrap(),
            time: Utc.with_ymd_and_hms(2019, 3, 4, 13, 45, 2).unwrap(),
            comment: None,
            valuation,
        }
    }

    #[test]
    fn test_signed_amount() {
        let expected: Decimal = "-12.5".parse().unwrap();
        assert_eq!(tx(TxType::Send, None).signed_amount(), expected);

        let expected: Decimal = "12.5".parse().unwrap();
        assert_eq!(tx(TxType::Receive, None).signed_amount(), expected);
    }

    #[test]
    fn test_zero_send_is_unsigned() {
        let mut send = tx(TxType::Send, Some("0.06".parse().unwrap()));
        send.amount = "0.00".parse().unwrap();

        assert_eq!(send.signed_amount().to_string(), "0.00");
        assert_eq!(send.fiat_value().unwrap().to_string(), "0");
    }

    #[test]
    fn test_fiat_value() {
        assert_eq!(tx(TxType::Send, None).fiat_value(), None);

        let valuation = Some("0.06".parse().unwrap());
        let expected: Decimal = "-0.75".parse().unwrap();
        assert_eq!(tx(TxType::Send, valuation).fiat_value(), Some(expected));
        assert_eq!(tx(TxType::Send, valuation).fiat_value().unwrap().to_string(), "-0.75");
    }
}
