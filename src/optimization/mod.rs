//! Debt-graph reduction algorithms.

pub mod simplify;
