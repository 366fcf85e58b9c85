//! Synthetic ledgers for stress tests and benchmarks.

pub mod random_ledger;
