use crate::core::ledger::Ledger;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Outcome of one simplification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplificationReport {
    /// Nonzero edges before simplifying.
    pub edges_before: usize,
    /// Nonzero edges after simplifying.
    pub edges_after: usize,
    /// Number of elementary rerouting steps applied.
    pub reroutes: usize,
    /// Number of full passes over the participants.
    pub rounds: usize,
}

impl SimplificationReport {
    pub fn edges_removed(&self) -> usize {
        self.edges_before.saturating_sub(self.edges_after)
    }

    /// Removed edges as a percentage of the starting edge count.
    pub fn reduction_percent(&self) -> f64 {
        if self.edges_before == 0 {
            return 0.0;
        }
        self.edges_removed() as f64 * 100.0 / self.edges_before as f64
    }
}

impl std::fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Simplification ===")?;
        writeln!(f, "Edges before:   {}", self.edges_before)?;
        writeln!(f, "Edges after:    {}", self.edges_after)?;
        writeln!(f, "Reroutes:       {}", self.reroutes)?;
        writeln!(f, "Rounds:         {}", self.rounds)?;
        write!(f, "Reduction:      {:.1}%", self.reduction_percent())
    }
}

/// A debt-graph reduction strategy.
///
/// Implementations may only move money along existing relationships in
/// ways that leave every participant's net position unchanged, and must
/// never increase the number of nonzero edges.
pub trait Simplifier {
    fn simplify(&self, ledger: &mut Ledger) -> SimplificationReport;
}

/// One pass over the participants in index order, turning each one into
/// a pure source or a pure sink of debt.
///
/// For participant `i`, every edge pointing against its net role is flow
/// passing through `i`; it is rerouted directly between `i`'s
/// counterparties. Later participants may reintroduce edges touching
/// earlier ones, so the result is not a canonical minimum.
///
/// # Examples
///
/// ```
/// use debt_ledger::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut ledger = Ledger::new();
/// ledger.add_participants(&["a", "b", "c"]).unwrap();
/// ledger.record_debt([0], 1, dec!(10)).unwrap();
/// ledger.record_debt([1], 2, dec!(10)).unwrap();
///
/// let report = SinglePassSimplifier.simplify(&mut ledger);
/// assert_eq!(report.edges_after, 1);
/// assert_eq!(ledger.entry(0, 2).unwrap(), dec!(10));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePassSimplifier;

impl SinglePassSimplifier {
    /// Run one pass, returning the number of reroutes applied.
    fn pass(ledger: &mut Ledger) -> usize {
        let mut reroutes = 0;
        for i in 0..ledger.len() {
            reroutes += Self::settle_through(ledger, i);
        }
        reroutes
    }

    /// Reroute every edge of `i` whose sign disagrees with `i`'s row sum.
    fn settle_through(ledger: &mut Ledger, i: usize) -> usize {
        let (mut to_remove, mut to_keep) = Self::classify(ledger, i);
        let mut reroutes = 0;

        while let Some(&r) = to_remove.front() {
            // A row with a wrong-way edge always has a right-way edge of
            // at least the same total magnitude.
            let Some(&k) = to_keep.front() else {
                break;
            };
            let row = ledger.row(i);
            let (removing, keeping) = (row[r], row[k]);

            // `<=` matters: on a tie the removed edge must leave the queue.
            let remove_smaller = removing.abs() <= keeping.abs();
            let amount = if remove_smaller { removing } else { keeping };
            let signed = if keeping.is_sign_negative() {
                -amount.abs()
            } else {
                amount.abs()
            };

            ledger.transfer(i, r, signed);
            ledger.transfer(i, k, -signed);
            ledger.transfer(r, k, signed);
            reroutes += 1;

            if remove_smaller {
                to_remove.pop_front();
            } else {
                to_keep.pop_front();
            }
        }
        reroutes
    }

    /// Split `i`'s counterparties into wrong-way edges (to remove) and
    /// right-way edges (to keep), both in increasing index order.
    fn classify(ledger: &Ledger, i: usize) -> (VecDeque<usize>, VecDeque<usize>) {
        let row = ledger.row(i);
        let owing: VecDeque<usize> = (0..row.len()).filter(|&j| row[j] > Decimal::ZERO).collect();
        let owed: VecDeque<usize> = (0..row.len()).filter(|&j| row[j] < Decimal::ZERO).collect();
        // Row sum >= 0, compared as two magnitudes so neither side can
        // exceed the ledger's total outstanding debt.
        let owing_total: Decimal = owing.iter().map(|&j| row[j]).sum();
        let owed_total: Decimal = owed.iter().map(|&j| -row[j]).sum();
        if owing_total >= owed_total {
            (owed, owing)
        } else {
            (owing, owed)
        }
    }
}

impl Simplifier for SinglePassSimplifier {
    fn simplify(&self, ledger: &mut Ledger) -> SimplificationReport {
        let edges_before = ledger.edge_count();
        let reroutes = Self::pass(ledger);
        SimplificationReport {
            edges_before,
            edges_after: ledger.edge_count(),
            reroutes,
            rounds: 1,
        }
    }
}

/// Repeats [`SinglePassSimplifier`] passes until a pass changes nothing
/// or `max_rounds` passes have run.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointSimplifier {
    pub max_rounds: usize,
}

impl Default for FixedPointSimplifier {
    fn default() -> Self {
        Self { max_rounds: 16 }
    }
}

impl Simplifier for FixedPointSimplifier {
    fn simplify(&self, ledger: &mut Ledger) -> SimplificationReport {
        let edges_before = ledger.edge_count();
        let mut reroutes = 0;
        let mut rounds = 0;
        while rounds < self.max_rounds {
            let applied = SinglePassSimplifier::pass(ledger);
            rounds += 1;
            reroutes += applied;
            if applied == 0 {
                break;
            }
        }
        SimplificationReport {
            edges_before,
            edges_after: ledger.edge_count(),
            reroutes,
            rounds,
        }
    }
}

/// Selectable simplification strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    SinglePass,
    FixedPoint,
}

impl Strategy {
    pub fn build(self, max_rounds: usize) -> Box<dyn Simplifier> {
        match self {
            Strategy::SinglePass => Box::new(SinglePassSimplifier),
            Strategy::FixedPoint => Box::new(FixedPointSimplifier { max_rounds }),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::SinglePass => f.write_str("single-pass"),
            Strategy::FixedPoint => f.write_str("fixed-point"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single-pass" => Ok(Strategy::SinglePass),
            "fixed-point" => Ok(Strategy::FixedPoint),
            other => Err(format!(
                "unknown strategy '{other}' (expected single-pass or fixed-point)"
            )),
        }
    }
}
