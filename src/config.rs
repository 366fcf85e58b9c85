//! Session configuration.

use crate::optimization::simplify::{Simplifier, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest `|entry(i, j) + entry(j, i)|` accepted when restoring a saved
/// ledger. Snapshots round to cents, so anything above a cent is damage.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.01);

/// Upper bound on passes for [`Strategy::FixedPoint`].
pub const DEFAULT_MAX_ROUNDS: usize = 16;

/// Knobs for an interactive session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prompt printed before each command.
    pub prompt: String,
    /// Anti-symmetry tolerance used when loading snapshots.
    pub tolerance: Decimal,
    /// Algorithm run by the `simplify` command.
    pub strategy: Strategy,
    /// Pass limit for the fixed-point strategy.
    pub max_rounds: usize,
}

impl SessionConfig {
    pub fn simplifier(&self) -> Box<dyn Simplifier> {
        self.strategy.build(self.max_rounds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            tolerance: DEFAULT_TOLERANCE,
            strategy: Strategy::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}
