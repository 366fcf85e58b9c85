use crate::core::edge::NonzeroEdges;
use crate::core::error::{LedgerError, NameRejection, ParticipantRef};
use crate::core::participant::ParticipantName;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Pairwise debts among a named group of participants.
///
/// The balance matrix is skew-symmetric: `entry(i, j) = a` means
/// participant `i` owes participant `j` the amount `a`, and
/// `entry(j, i) = -a`. The diagonal is always zero.
///
/// Participants are addressed by the index they were given when added.
/// Indices are contiguous from `0` and never reused; participants are
/// never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    names: Vec<ParticipantName>,
    matrix: Vec<Vec<Decimal>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from a participant list and a full balance matrix.
    ///
    /// Every name must be legal and unique, the matrix must be square with
    /// one row per name, and `matrix[i][j] + matrix[j][i]` must be within
    /// `tolerance` of zero (the diagonal within `tolerance` of zero too).
    /// The upper triangle is taken as authoritative, so the restored ledger
    /// is exactly anti-symmetric.
    pub fn from_parts<S: AsRef<str>>(
        names: &[S],
        matrix: Vec<Vec<Decimal>>,
        tolerance: Decimal,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Ledger::new();
        ledger.add_participants(names)?;

        let n = ledger.len();
        if matrix.len() != n {
            return Err(LedgerError::RowCount {
                expected: n,
                found: matrix.len(),
            });
        }
        if let Some((row, cells)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(LedgerError::RowLength {
                row,
                expected: n,
                found: cells.len(),
            });
        }

        let mut total = Decimal::ZERO;
        for i in 0..n {
            for j in i..n {
                let (value, mirror) = (matrix[i][j], matrix[j][i]);
                let within_tolerance = value
                    .checked_add(mirror)
                    .is_some_and(|gap| gap.abs() <= tolerance);
                if !within_tolerance {
                    return Err(LedgerError::NotAntiSymmetric {
                        row: i,
                        col: j,
                        value,
                        mirror,
                    });
                }
                if i != j {
                    total = total
                        .checked_add(value.abs())
                        .ok_or(LedgerError::Overflow)?;
                    ledger.matrix[i][j] = value;
                    ledger.matrix[j][i] = -value;
                }
            }
        }
        Ok(ledger)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Participant names in index order.
    pub fn names(&self) -> &[ParticipantName] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Result<&ParticipantName, LedgerError> {
        self.names
            .get(index)
            .ok_or(LedgerError::UnknownParticipant(ParticipantRef::Index(index)))
    }

    /// Resolve a name (case-insensitively) to its index.
    pub fn index_of(&self, name: &str) -> Result<usize, LedgerError> {
        let wanted = name.to_lowercase();
        self.names
            .iter()
            .position(|n| n.as_str() == wanted)
            .ok_or(LedgerError::UnknownParticipant(ParticipantRef::Name(wanted)))
    }

    /// Raw matrix cell: how much `debtor` owes `lender` (negative if the
    /// debt runs the other way).
    pub fn entry(&self, debtor: usize, lender: usize) -> Result<Decimal, LedgerError> {
        self.check_index(debtor)?;
        self.check_index(lender)?;
        Ok(self.matrix[debtor][lender])
    }

    /// Add a batch of participants.
    ///
    /// The batch is all-or-nothing: every name is validated (including
    /// against the other names in the batch) before any is appended. New
    /// participants start settled against everyone.
    pub fn add_participants<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), LedgerError> {
        let mut accepted: Vec<ParticipantName> = Vec::with_capacity(names.len());
        for raw in names {
            let raw = raw.as_ref();
            let name = ParticipantName::parse(raw).map_err(|reason| LedgerError::InvalidName {
                name: raw.to_string(),
                reason,
            })?;
            if self.names.contains(&name) || accepted.contains(&name) {
                return Err(LedgerError::InvalidName {
                    name: name.to_string(),
                    reason: NameRejection::Duplicate,
                });
            }
            accepted.push(name);
        }

        let new_len = self.len() + accepted.len();
        for row in &mut self.matrix {
            row.resize(new_len, Decimal::ZERO);
        }
        self.matrix
            .resize_with(new_len, || vec![Decimal::ZERO; new_len]);
        self.names.extend(accepted);
        Ok(())
    }

    /// Record that every participant in `debtors` owes `lender` the given
    /// `amount`.
    ///
    /// All indices are checked before anything changes. Duplicate debtors
    /// count once, and a debtor equal to the lender contributes nothing.
    /// This is the only public operation that moves net positions.
    ///
    /// Fails with [`LedgerError::Overflow`] if the total outstanding debt
    /// would no longer fit in a `Decimal`; the ledger is then unchanged.
    pub fn record_debt<I>(
        &mut self,
        debtors: I,
        lender: usize,
        amount: Decimal,
    ) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = usize>,
    {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }
        self.check_index(lender)?;
        let debtors: BTreeSet<usize> = debtors.into_iter().collect();
        for &debtor in &debtors {
            self.check_index(debtor)?;
        }

        let mut total = self.total_outstanding();
        for &debtor in debtors.iter().filter(|&&d| d != lender) {
            let before = self.matrix[debtor][lender];
            let after = before.checked_add(amount).ok_or(LedgerError::Overflow)?;
            total = (total - before.abs())
                .checked_add(after.abs())
                .ok_or(LedgerError::Overflow)?;
        }

        for debtor in debtors {
            self.transfer(debtor, lender, amount);
        }
        Ok(())
    }

    /// Signed single-edge update: `debtor` owes `lender` `amount` more
    /// (a negative amount moves the debt the other way).
    ///
    /// Callers have already validated both indices and keep the total
    /// outstanding debt in range.
    pub(crate) fn transfer(&mut self, debtor: usize, lender: usize, amount: Decimal) {
        if debtor == lender {
            return;
        }
        self.matrix[debtor][lender] += amount;
        self.matrix[lender][debtor] -= amount;
    }

    /// Zero every balance, keeping the participants.
    pub fn clear(&mut self) {
        for row in &mut self.matrix {
            row.fill(Decimal::ZERO);
        }
    }

    /// Net position of a participant: positive when the group owes them
    /// overall, negative when they owe the group, zero when settled.
    pub fn net_position(&self, index: usize) -> Result<Decimal, LedgerError> {
        Ok(-self.row_sum(index)?)
    }

    /// Sum of row `index`: what the participant owes minus what they are
    /// owed. The negation of [`net_position`](Self::net_position).
    pub(crate) fn row_sum(&self, index: usize) -> Result<Decimal, LedgerError> {
        self.check_index(index)?;
        self.matrix[index]
            .iter()
            .try_fold(Decimal::ZERO, |acc, &cell| acc.checked_add(cell))
            .ok_or(LedgerError::Overflow)
    }

    pub(crate) fn row(&self, index: usize) -> &[Decimal] {
        &self.matrix[index]
    }

    /// Every outstanding debt, one edge per participant pair.
    pub fn nonzero_edges(&self) -> NonzeroEdges<'_> {
        NonzeroEdges::new(&self.matrix)
    }

    /// Number of outstanding debt relationships.
    pub fn edge_count(&self) -> usize {
        self.nonzero_edges().count()
    }

    /// Sum of all outstanding debt magnitudes.
    ///
    /// Every mutation keeps this within `Decimal` range, which bounds each
    /// cell and each row sum as well.
    pub fn total_outstanding(&self) -> Decimal {
        self.nonzero_edges().map(|edge| edge.amount).sum()
    }

    /// Exact check of the matrix invariants (anti-symmetry, zero diagonal).
    pub fn is_anti_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            self.matrix[i][i].is_zero()
                && (i + 1..n).all(|j| self.matrix[i][j] == -self.matrix[j][i])
        })
    }

    fn check_index(&self, index: usize) -> Result<(), LedgerError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(LedgerError::UnknownParticipant(ParticipantRef::Index(index)))
        }
    }
}
