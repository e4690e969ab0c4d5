//! Attach estimated mint-batch unit values to transactions.

use crate::model::{MintSchedule, Stats, Transaction};
use tracing::trace;

/// Set `valuation` on every transaction from the schedule, in list order.
///
/// A missing value is normal: the schedule may be empty, or the transaction may fall outside the
/// dates it covers. Returns the number of transactions that received a value.
pub fn enrich(s: &mut Stats, schedule: &MintSchedule, transactions: &mut [Transaction]) -> usize {
    let mut found = 0;

    for tx in transactions.iter_mut() {
        tx.valuation = match schedule.value_at(tx.time) {
            Ok(value) => {
                found += 1;
                s.inc_valuations();
                Some(value)
            }
            Err(reason) => {
                trace!("No valuation for transaction {}: {reason}", tx.id);
                None
            }
        };
    }

    found
}
