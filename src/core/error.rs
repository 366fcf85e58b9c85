//! Errors raised by the ledger core.
//!
//! The core never logs and never retries; every failure is returned
//! synchronously to the caller, which decides how to report it.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a participant name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRejection {
    Empty,
    ContainsWhitespace,
    ReservedKeyword,
    Duplicate,
}

impl std::fmt::Display for NameRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            NameRejection::Empty => "name is empty",
            NameRejection::ContainsWhitespace => "name contains whitespace",
            NameRejection::ReservedKeyword => "name is a reserved keyword",
            NameRejection::Duplicate => "name is already taken",
        };
        f.write_str(reason)
    }
}

/// Reference to a participant that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantRef {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for ParticipantRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantRef::Index(i) => write!(f, "#{i}"),
            ParticipantRef::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Ledger failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("invalid participant name '{name}': {reason}")]
    InvalidName { name: String, reason: NameRejection },
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantRef),
    #[error("debt amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("balance matrix must have {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("balance matrix row {row} must have {expected} entries, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("balance matrix is not anti-symmetric at ({row}, {col}): {value} vs {mirror}")]
    NotAntiSymmetric {
        row: usize,
        col: usize,
        value: Decimal,
        mirror: Decimal,
    },
    #[error("amount out of range: total outstanding debt would exceed {}", Decimal::MAX)]
    Overflow,
}
