pub use self::{mint::*, stats::*, transaction::*};

pub mod constants;
pub mod ledgers;
pub(crate) mod mint;
mod stats;
mod transaction;
