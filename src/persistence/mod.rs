//! Saving and exporting ledgers.

pub mod report;
pub mod snapshot;
