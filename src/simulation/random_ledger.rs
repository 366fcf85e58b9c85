//! Random ledgers for stress testing and benchmarking the simplifier.

use crate::core::error::LedgerError;
use crate::core::ledger::Ledger;
use rand::seq::index;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Configuration for generating a random ledger.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of participants, named `p000`, `p001`, ...
    pub participant_count: usize,
    /// Number of random debts to record.
    pub debt_count: usize,
    /// Largest number of debtors sharing one debt.
    pub max_debtors: usize,
    /// Minimum debt amount.
    pub min_amount: Decimal,
    /// Maximum debt amount.
    pub max_amount: Decimal,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            participant_count: 8,
            debt_count: 20,
            max_debtors: 3,
            min_amount: Decimal::from(1),
            max_amount: Decimal::from(500),
        }
    }
}

/// Generate a random ledger using the thread-local RNG.
pub fn generate_random_ledger(config: &GeneratorConfig) -> Result<Ledger, LedgerError> {
    generate_random_ledger_with(config, &mut rand::thread_rng())
}

/// Generate a random ledger from the given RNG.
pub fn generate_random_ledger_with<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Ledger, LedgerError> {
    let names: Vec<String> = (0..config.participant_count)
        .map(|i| format!("p{:03}", i))
        .collect();
    let mut ledger = Ledger::new();
    ledger.add_participants(&names)?;

    if config.participant_count < 2 {
        return Ok(ledger);
    }

    // Amounts are whole cents.
    let cents = |amount: Decimal| (amount * Decimal::from(100)).to_i64();
    let min_cents = cents(config.min_amount).unwrap_or(100).max(1);
    let max_cents = cents(config.max_amount)
        .unwrap_or(50_000)
        .max(min_cents + 1);

    for _ in 0..config.debt_count {
        let lender = rng.gen_range(0..config.participant_count);
        let most = config.max_debtors.clamp(1, config.participant_count - 1);
        let debtor_count = rng.gen_range(1..=most);
        let debtors: Vec<usize> = index::sample(rng, config.participant_count, debtor_count + 1)
            .into_iter()
            .filter(|&d| d != lender)
            .take(debtor_count)
            .collect();
        let amount = Decimal::new(rng.gen_range(min_cents..max_cents), 2);
        ledger.record_debt(debtors, lender, amount)?;
    }

    Ok(ledger)
}
