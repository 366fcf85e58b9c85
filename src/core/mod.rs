//! Ledger data model: participants, the balance matrix, and debt edges.

pub mod edge;
pub mod error;
pub mod ledger;
pub mod participant;
