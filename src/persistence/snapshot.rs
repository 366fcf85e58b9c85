//! Versioned plain-text ledger snapshots.
//!
//! ```text
//! 0.3
//! alice bob carol
//! 0.00 10.00 0.00
//! -10.00 0.00 0.00
//! 0.00 0.00 0.00
//! ```
//!
//! Line one is the format version, line two the participant names in
//! index order, then one line per matrix row. Amounts are rounded to two
//! decimals, so a round trip is exact only to the cent.

use crate::core::error::LedgerError;
use crate::core::ledger::Ledger;
use log::{info, warn};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Version tag written on the first line of every snapshot.
pub const SNAPSHOT_VERSION: &str = "0.3";

/// A snapshot that could not be turned into a ledger.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is missing its {0} line")]
    MissingHeader(&'static str),
    #[error("line {line}: '{token}' is not a valid amount")]
    InvalidAmount { line: usize, token: String },
    #[error("line {line}: expected {expected} amounts, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} matrix rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("snapshot is corrupt: {0}")]
    Ledger(#[from] LedgerError),
}

/// Something suspicious about a snapshot that did not stop it loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotWarning {
    VersionMismatch { expected: String, found: String },
}

impl std::fmt::Display for SnapshotWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotWarning::VersionMismatch { expected, found } => write!(
                f,
                "snapshot version '{found}' differs from '{expected}'; data may be corrupt, loading anyway"
            ),
        }
    }
}

/// A parsed snapshot.
#[derive(Debug)]
pub struct Loaded {
    pub ledger: Ledger,
    pub warnings: Vec<SnapshotWarning>,
}

/// Render `ledger` in snapshot format.
pub fn render(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str(SNAPSHOT_VERSION);
    out.push('\n');
    let names: Vec<&str> = ledger.names().iter().map(|n| n.as_str()).collect();
    out.push_str(&names.join(" "));
    out.push('\n');
    for i in 0..ledger.len() {
        let row: Vec<String> = (0..ledger.len())
            .map(|j| format_amount(ledger.entry(i, j).unwrap_or_default()))
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_zero() {
        "0.00".to_string()
    } else {
        format!("{:.2}", rounded)
    }
}

/// Parse snapshot text, validating names and anti-symmetry within
/// `tolerance`.
pub fn parse(text: &str, tolerance: Decimal) -> Result<Loaded, SnapshotError> {
    let mut lines = text.lines().enumerate();
    let mut warnings = Vec::new();

    let (_, version) = lines.next().ok_or(SnapshotError::MissingHeader("version"))?;
    let version = version.trim();
    if version != SNAPSHOT_VERSION {
        warnings.push(SnapshotWarning::VersionMismatch {
            expected: SNAPSHOT_VERSION.to_string(),
            found: version.to_string(),
        });
    }

    let (_, names_line) = lines.next().ok_or(SnapshotError::MissingHeader("names"))?;
    let names: Vec<&str> = names_line.split_whitespace().collect();

    let mut matrix = Vec::with_capacity(names.len());
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<Decimal>().map_err(|_| SnapshotError::InvalidAmount {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if row.len() != names.len() {
            return Err(SnapshotError::RowLength {
                line: line_no,
                expected: names.len(),
                found: row.len(),
            });
        }
        matrix.push(row);
    }
    if matrix.len() != names.len() {
        return Err(SnapshotError::RowCount {
            expected: names.len(),
            found: matrix.len(),
        });
    }

    let ledger = Ledger::from_parts(&names, matrix, tolerance)?;
    Ok(Loaded { ledger, warnings })
}

/// Write `ledger` to `path`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, ledger: &Ledger) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    fs::write(path, render(ledger))?;
    info!(
        "saved {} participants to {}",
        ledger.len(),
        path.display()
    );
    Ok(())
}

/// Read a snapshot from `path`.
pub fn load(path: impl AsRef<Path>, tolerance: Decimal) -> Result<Loaded, SnapshotError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let loaded = parse(&text, tolerance)?;
    for warning in &loaded.warnings {
        warn!("{}: {}", path.display(), warning);
    }
    info!(
        "loaded {} participants from {}",
        loaded.ledger.len(),
        path.display()
    );
    Ok(loaded)
}
