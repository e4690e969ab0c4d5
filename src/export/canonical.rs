use super::{writer_with_header, ExportError, DATE_TIME_FORMAT};
use crate::model::Transaction;
use serde::Serialize;

pub const HEADER: [&str; 9] = [
    "Txn ID",
    "Timestamp",
    "Txn Type",
    "Amount",
    "Currency",
    "User",
    "Balance",
    "Comment",
    "CalculatedMintValue",
];

#[derive(Debug, Serialize)]
struct CanonicalRow<'a> {
    id: u64,
    time: String,
    tx_type: &'static str,
    amount: String,
    currency: &'a str,
    counterparty: &'a str,
    balance: String,
    comment: Option<&'a str>,
    mint_value: Option<String>,
}

impl<'a> From<&'a Transaction> for CanonicalRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: tx.id,
            time: tx.time.format(DATE_TIME_FORMAT).to_string(),
            tx_type: tx.tx_type.as_str(),
            amount: tx.amount.to_string(),
            currency: &tx.currency,
            counterparty: &tx.counterparty,
            balance: tx.balance_after.to_string(),
            comment: tx.comment.as_deref(),
            mint_value: tx.valuation.map(|value| value.normalize().to_string()),
        }
    }
}

/// Write every field of every transaction, amounts exactly as they appeared in the log.
pub fn write<W: std::io::Write>(transactions: &[Transaction], writer: W) -> Result<(), ExportError> {
    let mut writer = writer_with_header(writer, &HEADER)?;
    for tx in transactions {
        writer.serialize(CanonicalRow::from(tx))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ledgers::lines::LedgerLine;
    use crate::model::{constants::LOG_TIME_FORMAT, TxType};
    use arbtest::arbtest;
    use chrono::{DateTime, TimeZone as _, Utc};
    use rust_decimal::Decimal;
    use similar_asserts::assert_eq;

    fn read_back(bytes: &[u8]) -> Vec<csv::StringRecord> {
        csv::Reader::from_reader(bytes)
            .records()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_write_canonical() {
        let txs = vec![
            Transaction {
                id: 7,
                tx_type: TxType::Send,
                amount: "12.5".parse().unwrap(),
                currency: "NCR".to_string(),
                counterparty: "Alice".to_string(),
                balance_after: "87.5".parse().unwrap(),
                time: Utc.with_ymd_and_hms(2019, 3, 4, 13, 45, 2).unwrap(),
                comment: Some("gift, for \"birthday\"".to_string()),
                valuation: Some("0.060750".parse().unwrap()),
            },
            Transaction {
                id: 8,
                tx_type: TxType::Receive,
                amount: "100".parse().unwrap(),
                currency: "KFC".to_string(),
                counterparty: "Bob".to_string(),
                balance_after: "100.00".parse().unwrap(),
                time: Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).unwrap(),
                comment: None,
                valuation: None,
            },
        ];

        let mut actual = Vec::new();
        write(&txs, &mut actual).unwrap();

        let expected = concat!(
            "Txn ID,Timestamp,Txn Type,Amount,Currency,User,Balance,Comment,CalculatedMintValue\n",
            "7,2019-03-04 13:45:02,SEND,12.5,NCR,Alice,87.5,\"gift, for \"\"birthday\"\"\",0.06075\n",
            "8,2022-01-02 03:04:05,RECEIVE,100,KFC,Bob,100.00,,\n",
        );
        assert_eq!(String::from_utf8(actual).unwrap(), expected);
    }

    #[test]
    fn prop_test_parsed_fields_survive_export() {
        const NAMES: [&str; 5] = [
            "Alice",
            "Bob, the Builder",
            "Carol \"CJ\" Jones",
            "Dave to Erin",
            "U-1234567",
        ];
        const CURRENCIES: [&str; 2] = ["NCR", "KFC"];

        arbtest(|u| {
            let mut lines = Vec::new();
            let mut expected = Vec::new();

            for _ in 0..u.int_in_range(0..=20)? {
                let id = u.int_in_range(0..=u32::MAX)?;
                let tx_type = *u.choose(&[TxType::Send, TxType::Receive])?;
                let amount = Decimal::new(u.int_in_range(0..=10_000_000)?, u.int_in_range(0..=4)?);
                let balance = Decimal::new(u.int_in_range(0..=10_000_000)?, u.int_in_range(0..=4)?);
                let currency = *u.choose(&CURRENCIES)?;
                let name = *u.choose(&NAMES)?;
                let time: DateTime<Utc> = DateTime::from_timestamp(
                    u.int_in_range(1_546_300_800..=1_672_531_199)?,
                    0,
                )
                .unwrap();

                lines.push(format!(
                    "[{id}] {tx_type} {amount} {currency}{marker}{name}. Balance: {balance}. \
                     Timestamp: {time}.",
                    marker = tx_type.counterparty_marker(),
                    time = time.format(LOG_TIME_FORMAT),
                ));
                expected.push(vec![
                    id.to_string(),
                    time.format(DATE_TIME_FORMAT).to_string(),
                    tx_type.to_string(),
                    amount.to_string(),
                    currency.to_string(),
                    name.to_string(),
                    balance.to_string(),
                    String::new(),
                    String::new(),
                ]);
            }

            let txs: Vec<_> = lines
                .iter()
                .map(|line| match LedgerLine::parse(line).unwrap() {
                    LedgerLine::Send(tx) | LedgerLine::Receive(tx) => tx,
                    other => panic!("Expected a transaction, got {other:?}"),
                })
                .collect();

            let mut bytes = Vec::new();
            write(&txs, &mut bytes).unwrap();
            let actual: Vec<Vec<String>> = read_back(&bytes)
                .iter()
                .map(|record| record.iter().map(str::to_string).collect())
                .collect();
            assert_eq!(actual, expected);

            Ok(())
        })
        .budget_ms(200)
        .run();
    }
}
