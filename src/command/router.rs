use crate::command::parser::{Beneficiaries, Command, ParseError, HELP_TEXT};
use crate::config::SessionConfig;
use crate::core::error::LedgerError;
use crate::core::ledger::Ledger;
use crate::optimization::simplify::{SimplificationReport, Simplifier};
use crate::persistence::snapshot::{self, SnapshotError};
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::io::Write;
use thiserror::Error;

/// Anything that can go wrong while running one command.
///
/// Everything except [`SessionError::Output`] leaves the ledger as it was
/// and is meant to be shown to the user, who can retry.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// An interactive session: one ledger driven by one user, one command
/// at a time.
pub struct Session {
    ledger: Ledger,
    simplifier: Box<dyn Simplifier>,
    config: SessionConfig,
}

impl Session {
    pub fn new(ledger: Ledger, config: SessionConfig) -> Self {
        Self {
            ledger,
            simplifier: config.simplifier(),
            config,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run the configured simplifier over the ledger.
    pub fn simplify(&mut self) -> SimplificationReport {
        let report = self.simplifier.simplify(&mut self.ledger);
        info!(
            "simplified {} edges to {} in {} reroutes",
            report.edges_before, report.edges_after, report.reroutes
        );
        report
    }

    /// Parse and run one line of input. Blank lines do nothing.
    pub fn handle_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Control, SessionError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command, out),
            None => Ok(Control::Continue),
        }
    }

    pub fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Control, SessionError> {
        debug!("executing {:?}", command);
        match command {
            Command::Print => self.print_debts(out)?,
            Command::Balances => self.print_balances(out)?,
            Command::Stats => {
                writeln!(
                    out,
                    "{} debts outstanding, {} in total",
                    self.ledger.edge_count(),
                    money(self.ledger.total_outstanding())
                )?;
            }
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Simplify => {
                let report = self.simplify();
                writeln!(
                    out,
                    "Simplified {} debts to {}.",
                    report.edges_before, report.edges_after
                )?;
            }
            Command::Clear => {
                self.ledger.clear();
                writeln!(out, "All debts cleared.")?;
            }
            Command::Quit => return Ok(Control::Quit),
            Command::Add(names) => {
                self.ledger.add_participants(&names)?;
                let current: Vec<&str> =
                    self.ledger.names().iter().map(|n| n.as_str()).collect();
                writeln!(out, "Current participants: {}", current.join(", "))?;
            }
            Command::Save(path) => {
                snapshot::save(&path, &self.ledger)?;
                writeln!(out, "Saved to {}.", path.display())?;
            }
            Command::Owes {
                debtor,
                lender,
                amount,
            } => {
                let debtor = self.ledger.index_of(&debtor)?;
                let lender = self.ledger.index_of(&lender)?;
                self.ledger.record_debt([debtor], lender, amount)?;
            }
            Command::Paid {
                payer,
                amount,
                beneficiaries,
            } => self.split(&payer, amount, &beneficiaries)?,
        }
        Ok(Control::Continue)
    }

    /// Split `amount` evenly between the payer and the beneficiaries. The
    /// payer always carries one share themselves, whether or not they are
    /// listed.
    fn split(
        &mut self,
        payer: &str,
        amount: Decimal,
        beneficiaries: &Beneficiaries,
    ) -> Result<(), LedgerError> {
        let payer = self.ledger.index_of(payer)?;
        let mut debtors: BTreeSet<usize> = match beneficiaries {
            Beneficiaries::All => (0..self.ledger.len()).collect(),
            Beneficiaries::Named(names) => names
                .iter()
                .map(|name| self.ledger.index_of(name))
                .collect::<Result<BTreeSet<usize>, LedgerError>>()?,
        };
        debtors.remove(&payer);

        let share = amount / Decimal::from(debtors.len() + 1);
        debug!("split {} into {} shares of {}", amount, debtors.len() + 1, share);
        self.ledger.record_debt(debtors, payer, share)
    }

    fn print_debts<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let names = self.ledger.names();
        let mut any = false;
        for edge in self.ledger.nonzero_edges() {
            any = true;
            writeln!(
                out,
                "{} owes {} {}",
                names[edge.debtor],
                names[edge.lender],
                money(edge.amount)
            )?;
        }
        if !any {
            writeln!(out, "No debts.")?;
        }
        Ok(())
    }

    fn print_balances<W: Write>(&self, out: &mut W) -> Result<(), SessionError> {
        for (i, name) in self.ledger.names().iter().enumerate() {
            let net = self.ledger.net_position(i)?;
            if net > Decimal::ZERO {
                writeln!(out, "{name} is owed {}", money(net))?;
            } else if net < Decimal::ZERO {
                writeln!(out, "{name} owes {}", money(-net))?;
            } else {
                writeln!(out, "{name} is settled")?;
            }
        }
        Ok(())
    }
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}
