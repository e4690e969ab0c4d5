use crate::model::ledgers::lines::{LedgerLine, ParseLineError};
use crate::model::{Stats, Transaction};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Malformed transaction on line {0}")]
    Malformed(usize, #[source] ParseLineError),
}

#[derive(Debug, Error)]
#[error("Unknown malformed line policy `{0}`. Try one of: `abort`, `skip`")]
pub struct MalformedLinesError(String);

/// What to do with a transfer line that is missing a marker or has an unparseable field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MalformedLines {
    /// Stop the run at the first malformed line.
    #[default]
    Abort,

    /// Log and count the line, then carry on.
    Skip,
}

impl FromStr for MalformedLines {
    type Err = MalformedLinesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(MalformedLinesError(s.to_string())),
        }
    }
}

/// Single forward pass over classified lines.
///
/// The only state is the index of the last transaction that may still take a comment. A comment
/// consumes it, so at most one comment attaches to any transaction; comments with nothing to
/// attach to are dropped and counted.
#[derive(Debug, Default)]
struct Assembler {
    transactions: Vec<Transaction>,
    eligible: Option<usize>,
}

impl Assembler {
    fn push(&mut self, s: &mut Stats, line_number: usize, line: LedgerLine) {
        match line {
            LedgerLine::Send(tx) => {
                s.inc_sends();
                self.push_transaction(tx);
            }
            LedgerLine::Receive(tx) => {
                s.inc_receives();
                self.push_transaction(tx);
            }
            LedgerLine::Comment(comment) => match self.eligible.take() {
                Some(index) => {
                    self.transactions[index].comment = Some(comment);
                    s.inc_comments_attached();
                }
                None => {
                    debug!("Dropping comment on line {line_number}: {comment:?}");
                    s.inc_comments_dropped();
                }
            },
            LedgerLine::Ignored => s.inc_ignored_lines(),
        }
    }

    fn push_transaction(&mut self, tx: Transaction) {
        self.eligible = Some(self.transactions.len());
        self.transactions.push(tx);
    }

    /// A skipped transfer line still ends the previous transaction's comment window.
    fn skip(&mut self, s: &mut Stats) {
        self.eligible = None;
        s.inc_malformed_skipped();
    }
}

/// Assemble transactions from wallet log lines, in file order.
pub fn assemble<I, S>(
    s: &mut Stats,
    lines: I,
    malformed: MalformedLines,
) -> Result<Vec<Transaction>, AssembleError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = Assembler::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        s.inc_log_lines();

        match LedgerLine::parse(line.as_ref()) {
            Ok(line) => assembler.push(s, line_number, line),
            Err(err) => match malformed {
                MalformedLines::Abort => return Err(AssembleError::Malformed(line_number, err)),
                MalformedLines::Skip => {
                    warn!("Skipping malformed transaction on line {line_number}: {err}");
                    assembler.skip(s);
                }
            },
        }
    }

    Ok(assembler.transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::activity::read_activity_log;
    use crate::model::{constants, TxType};
    use similar_asserts::assert_eq;
    use tracing_test::traced_test;

    const SEND_7: &str =
        "[7 SEND 12.5 NCR to Alice. Balance: 87.5. Timestamp: Monday, 04 March 2019 13:45:02.";
    const RECEIVE_8: &str =
        "[8] RECEIVE 2 NCR from Bob. Balance: 89.5. Timestamp: Monday, 04 March 2019 14:00:00.";
    const BROKEN_9: &str = "[9] SEND 1 NCR to Carol. Timestamp: Monday, 04 March 2019 15:00:00.";

    fn comments(txs: &[Transaction]) -> Vec<Option<&str>> {
        txs.iter().map(|tx| tx.comment.as_deref()).collect()
    }

    #[test]
    fn test_comment_attaches_to_preceding_transaction() {
        let mut stats = Stats::default();
        let txs = assemble(
            &mut stats,
            [SEND_7, "Comment: gift for birthday"],
            MalformedLines::Abort,
        )
        .unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id, 7);
        assert_eq!(txs[0].tx_type, TxType::Send);
        assert_eq!(txs[0].counterparty, "Alice");
        assert_eq!(txs[0].comment.as_deref(), Some("gift for birthday"));
        assert_eq!(stats.comments_attached(), 1);
    }

    #[test]
    fn test_orphan_and_second_comments_are_dropped() {
        let mut stats = Stats::default();
        let lines = [
            "Comment: nothing above me",
            SEND_7,
            "Comment: first",
            "Comment: second",
            RECEIVE_8,
        ];
        let txs = assemble(&mut stats, lines, MalformedLines::Abort).unwrap();

        assert_eq!(comments(&txs), vec![Some("first"), None]);
        assert_eq!(stats.comments_attached(), 1);
        assert_eq!(stats.comments_dropped(), 2);
    }

    #[test]
    fn test_ignored_lines_keep_comment_window_open() {
        let mut stats = Stats::default();
        let lines = [SEND_7, "", "--- page 2 ---", "Comment: late"];
        let txs = assemble(&mut stats, lines, MalformedLines::Abort).unwrap();

        assert_eq!(comments(&txs), vec![Some("late")]);
        assert_eq!(stats.ignored_lines(), 2);
    }

    #[test]
    fn test_each_transaction_gets_its_own_comment() {
        let mut stats = Stats::default();
        let lines = [SEND_7, RECEIVE_8, "Comment: for eight"];
        let txs = assemble(&mut stats, lines, MalformedLines::Abort).unwrap();

        assert_eq!(comments(&txs), vec![None, Some("for eight")]);
    }

    #[test]
    fn test_malformed_line_aborts() {
        let mut stats = Stats::default();
        let lines = [SEND_7, RECEIVE_8, BROKEN_9];
        let result = assemble(&mut stats, lines, MalformedLines::Abort);

        assert!(matches!(
            result,
            Err(AssembleError::Malformed(
                3,
                ParseLineError::MissingMarker(_)
            ))
        ));
    }

    #[test]
    #[traced_test]
    fn test_malformed_line_skipped() {
        let _ = tracing_log::LogTracer::init();

        let mut stats = Stats::default();
        let lines = [SEND_7, BROKEN_9, "Comment: belongs to nine", RECEIVE_8];
        let txs = assemble(&mut stats, lines, MalformedLines::Skip).unwrap();

        let ids: Vec<_> = txs.iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![7, 8]);
        assert_eq!(comments(&txs), vec![None, None]);
        assert_eq!(stats.malformed_skipped(), 1);
        assert_eq!(stats.comments_dropped(), 1);
        assert!(logs_contain("Skipping malformed transaction on line 2"));
    }

    #[test]
    fn test_malformed_lines_from_str() {
        assert_eq!("abort".parse::<MalformedLines>().unwrap(), MalformedLines::Abort);
        assert_eq!(" SKIP ".parse::<MalformedLines>().unwrap(), MalformedLines::Skip);
        assert!("retry".parse::<MalformedLines>().is_err());
    }

    #[test]
    #[traced_test]
    fn test_assemble_fixture() {
        let _ = tracing_log::LogTracer::init();

        let mut stats = Stats::default();
        let log = read_activity_log(constants::FIXTURE_LEDGER_LOG).unwrap();
        let txs = assemble(&mut stats, log.lines(), MalformedLines::Abort).unwrap();

        let ids: Vec<_> = txs.iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(
            comments(&txs),
            vec![
                Some("welcome bonus"),
                Some("gift for birthday"),
                Some(r#"rent "June""#),
                None,
                Some("holiday sale"),
                None,
                Some("after the cutoff"),
            ]
        );
        assert_eq!(txs[2].counterparty, "Bob, the Builder");
        assert!(txs.iter().all(|tx| tx.valuation.is_none()));

        assert_eq!(stats.log_lines(), 16);
        assert_eq!(stats.transactions(), 7);
        assert_eq!(stats.comments_attached(), 5);
        assert_eq!(stats.comments_dropped(), 2);
        assert_eq!(stats.ignored_lines(), 2);
        assert_eq!(stats.malformed_skipped(), 0);
    }
}
