use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single outstanding debt between two participants.
///
/// `debtor` owes `lender` exactly `amount`, which is always positive.
/// Edges are derived views of the balance matrix, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtEdge {
    pub debtor: usize,
    pub lender: usize,
    pub amount: Decimal,
}

impl DebtEdge {
    /// Build the edge for the cell `(i, j)` holding `value`, orienting it
    /// by sign: a positive value means `i` owes `j`.
    fn from_cell(i: usize, j: usize, value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Self {
                debtor: i,
                lender: j,
                amount: value,
            }
        } else {
            Self {
                debtor: j,
                lender: i,
                amount: -value,
            }
        }
    }

    /// Whether `participant` is either end of this edge.
    pub fn touches(&self, participant: usize) -> bool {
        self.debtor == participant || self.lender == participant
    }
}

/// Lazy walk over the upper triangle of a balance matrix, yielding one
/// [`DebtEdge`] per nonzero cell, ordered by row then column.
///
/// Cloning the iterator (or asking the ledger for a fresh one) restarts
/// the walk.
#[derive(Debug, Clone)]
pub struct NonzeroEdges<'a> {
    matrix: &'a [Vec<Decimal>],
    row: usize,
    col: usize,
}

impl<'a> NonzeroEdges<'a> {
    pub(crate) fn new(matrix: &'a [Vec<Decimal>]) -> Self {
        Self {
            matrix,
            row: 0,
            col: 1,
        }
    }
}

impl Iterator for NonzeroEdges<'_> {
    type Item = DebtEdge;

    fn next(&mut self) -> Option<DebtEdge> {
        let n = self.matrix.len();
        while self.row < n {
            while self.col < n {
                let (i, j) = (self.row, self.col);
                self.col += 1;
                let value = self.matrix[i][j];
                if !value.is_zero() {
                    return Some(DebtEdge::from_cell(i, j, value));
                }
            }
            self.row += 1;
            self.col = self.row + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_edges_oriented_by_sign() {
        let matrix = vec![
            vec![dec!(0), dec!(5), dec!(-3)],
            vec![dec!(-5), dec!(0), dec!(0)],
            vec![dec!(3), dec!(0), dec!(0)],
        ];
        let edges: Vec<_> = NonzeroEdges::new(&matrix).collect();
        assert_eq!(
            edges,
            vec![
                DebtEdge { debtor: 0, lender: 1, amount: dec!(5) },
                DebtEdge { debtor: 2, lender: 0, amount: dec!(3) },
            ]
        );
    }

    #[test]
    fn test_edges_restartable() {
        let matrix = vec![vec![dec!(0), dec!(1)], vec![dec!(-1), dec!(0)]];
        let walk = NonzeroEdges::new(&matrix);
        let first: Vec<_> = walk.clone().collect();
        let second: Vec<_> = walk.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_edges_empty_matrix() {
        let matrix: Vec<Vec<Decimal>> = Vec::new();
        assert_eq!(NonzeroEdges::new(&matrix).count(), 0);
    }

    #[test]
    fn test_edge_touches() {
        let edge = DebtEdge { debtor: 2, lender: 4, amount: dec!(1) };
        assert!(edge.touches(2));
        assert!(edge.touches(4));
        assert!(!edge.touches(3));
    }
}
