use approx::assert_relative_eq;
use debt_ledger::core::ledger::Ledger;
use debt_ledger::optimization::simplify::{
    FixedPointSimplifier, SimplificationReport, Simplifier, SinglePassSimplifier,
};
use debt_ledger::persistence::snapshot;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

/// One `record_debt` call: debtor indices, lender index, amount in cents.
type DebtOp = (Vec<usize>, usize, i64);

/// Generate a random debt among `n` participants (debtors may include the
/// lender, which must be harmless).
fn arb_debt(n: usize) -> impl Strategy<Value = DebtOp> {
    (
        prop::collection::vec(0..n, 1..=n),
        0..n,
        1i64..1_000_000i64,
    )
}

/// Generate a group of 2..=6 participants and 0..40 debts among them.
fn arb_history() -> impl Strategy<Value = (usize, Vec<DebtOp>)> {
    (2usize..=NAMES.len())
        .prop_flat_map(|n| (Just(n), prop::collection::vec(arb_debt(n), 0..40)))
}

fn arb_ledger() -> impl Strategy<Value = Ledger> {
    arb_history().prop_map(|(n, debts)| build(n, &debts))
}

fn build(n: usize, debts: &[DebtOp]) -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add_participants(&NAMES[..n]).unwrap();
    for (debtors, lender, cents) in debts {
        ledger
            .record_debt(debtors.iter().copied(), *lender, Decimal::new(*cents, 2))
            .unwrap();
    }
    ledger
}

fn net_positions(ledger: &Ledger) -> Vec<Decimal> {
    (0..ledger.len())
        .map(|i| ledger.net_position(i).unwrap())
        .collect()
}

proptest! {
    // ===================================================================
    // Every recorded debt keeps the matrix anti-symmetric with a zero
    // diagonal, checked after each individual call.
    // ===================================================================
    #[test]
    fn record_debt_keeps_anti_symmetry((n, debts) in arb_history()) {
        let mut ledger = Ledger::new();
        ledger.add_participants(&NAMES[..n]).unwrap();
        for (debtors, lender, cents) in debts {
            ledger.record_debt(debtors, lender, Decimal::new(cents, 2)).unwrap();
            prop_assert!(ledger.is_anti_symmetric());
        }
    }

    // ===================================================================
    // Net positions always sum to zero across the group.
    // ===================================================================
    #[test]
    fn global_conservation(ledger in arb_ledger()) {
        let total: Decimal = net_positions(&ledger).into_iter().sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }

    // ===================================================================
    // Simplifying never moves anybody's net position, never adds edges,
    // and leaves a well-formed matrix.
    // ===================================================================
    #[test]
    fn single_pass_preserves_positions(ledger in arb_ledger()) {
        let before = net_positions(&ledger);
        let mut simplified = ledger.clone();
        let report = SinglePassSimplifier.simplify(&mut simplified);

        prop_assert_eq!(net_positions(&simplified), before);
        prop_assert!(report.edges_after <= report.edges_before);
        prop_assert_eq!(report.edges_before, ledger.edge_count());
        prop_assert!(simplified.is_anti_symmetric());
    }

    #[test]
    fn fixed_point_preserves_positions(ledger in arb_ledger()) {
        let before = net_positions(&ledger);
        let mut simplified = ledger.clone();
        let report = FixedPointSimplifier::default().simplify(&mut simplified);

        prop_assert_eq!(net_positions(&simplified), before);
        prop_assert!(report.edges_after <= report.edges_before);
        prop_assert!(simplified.is_anti_symmetric());
    }

    // ===================================================================
    // A fixed-point run is never worse than a single pass.
    // ===================================================================
    #[test]
    fn fixed_point_not_worse_than_single_pass(ledger in arb_ledger()) {
        let mut single = ledger.clone();
        let mut fixed = ledger;
        let single_report = SinglePassSimplifier.simplify(&mut single);
        let fixed_report = FixedPointSimplifier::default().simplify(&mut fixed);
        prop_assert!(fixed_report.edges_after <= single_report.edges_after);
    }

    // ===================================================================
    // Newly added participants start with no edges.
    // ===================================================================
    #[test]
    fn new_participants_start_settled(mut ledger in arb_ledger()) {
        let first_new = ledger.len();
        ledger.add_participants(&["newcomer", "latecomer"]).unwrap();
        prop_assert!(ledger
            .nonzero_edges()
            .all(|edge| edge.debtor < first_new && edge.lender < first_new));
        prop_assert_eq!(ledger.net_position(first_new).unwrap(), Decimal::ZERO);
    }

    // ===================================================================
    // Snapshot round trip is exact to the cent.
    // ===================================================================
    #[test]
    fn snapshot_round_trip(ledger in arb_ledger()) {
        let loaded = snapshot::parse(&snapshot::render(&ledger), dec!(0.01)).unwrap();
        prop_assert_eq!(loaded.ledger.names(), ledger.names());
        for i in 0..ledger.len() {
            for j in 0..ledger.len() {
                let diff = loaded.ledger.entry(i, j).unwrap() - ledger.entry(i, j).unwrap();
                prop_assert!(diff.abs() <= dec!(0.005));
            }
        }
    }

    // ===================================================================
    // Clearing always leaves zero edges and zero positions.
    // ===================================================================
    #[test]
    fn clear_zeroes_everything(mut ledger in arb_ledger()) {
        let n = ledger.len();
        ledger.clear();
        prop_assert_eq!(ledger.len(), n);
        prop_assert_eq!(ledger.edge_count(), 0);
        prop_assert!(net_positions(&ledger).iter().all(|p| p.is_zero()));
    }
}

#[test]
fn reduction_percent_matches_counts() {
    let report = SimplificationReport {
        edges_before: 8,
        edges_after: 5,
        reroutes: 4,
        rounds: 1,
    };
    assert_eq!(report.edges_removed(), 3);
    assert_relative_eq!(report.reduction_percent(), 37.5);
}
