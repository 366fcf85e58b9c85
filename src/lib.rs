//! # debt-ledger
//!
//! Shared-expense bookkeeping for small groups.
//!
//! Pairwise debts live in a skew-symmetric balance matrix. The simplifier
//! reroutes debt chains (A owes B, B owes C) into direct debts (A owes C),
//! shrinking the number of outstanding relationships without changing
//! anybody's net position.
//!
//! ## Architecture
//!
//! - **core** — Participants, the balance matrix ledger, debt edges
//! - **optimization** — Debt simplification strategies
//! - **command** — Command parsing, the session router, the prompt loop
//! - **persistence** — Plain-text snapshots and JSON reports
//! - **simulation** — Random ledgers for stress testing

pub mod command;
pub mod config;
pub mod core;
pub mod optimization;
pub mod persistence;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::command::parser::Command;
    pub use crate::command::router::{Control, Session};
    pub use crate::config::SessionConfig;
    pub use crate::core::edge::DebtEdge;
    pub use crate::core::error::LedgerError;
    pub use crate::core::ledger::Ledger;
    pub use crate::optimization::simplify::{
        FixedPointSimplifier, SimplificationReport, Simplifier, SinglePassSimplifier, Strategy,
    };
}
