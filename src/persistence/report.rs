use crate::core::error::LedgerError;
use crate::core::ledger::Ledger;
use crate::optimization::simplify::SimplificationReport;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Machine-readable view of a ledger, for `report --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub generated_at: DateTime<Utc>,
    pub participants: Vec<ParticipantReport>,
    pub debts: Vec<DebtReport>,
    pub total_outstanding: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplification: Option<SimplificationReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantReport {
    pub name: String,
    pub net_position: Decimal,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebtReport {
    pub debtor: String,
    pub lender: String,
    pub amount: Decimal,
}

impl LedgerReport {
    pub fn from_ledger(
        ledger: &Ledger,
        simplification: Option<SimplificationReport>,
    ) -> Result<Self, LedgerError> {
        let names = ledger.names();
        let participants = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let net_position = ledger.net_position(i)?;
                Ok(ParticipantReport {
                    name: name.to_string(),
                    net_position,
                    status: status(net_position).to_string(),
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;
        let debts = ledger
            .nonzero_edges()
            .map(|edge| DebtReport {
                debtor: names[edge.debtor].to_string(),
                lender: names[edge.lender].to_string(),
                amount: edge.amount,
            })
            .collect();

        Ok(Self {
            generated_at: Utc::now(),
            participants,
            debts,
            total_outstanding: ledger.total_outstanding(),
            simplification,
        })
    }
}

fn status(net_position: Decimal) -> &'static str {
    if net_position > Decimal::ZERO {
        "CREDITOR"
    } else if net_position < Decimal::ZERO {
        "DEBTOR"
    } else {
        "SETTLED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_serializes() {
        let mut ledger = Ledger::new();
        ledger.add_participants(&["a", "b", "c"]).unwrap();
        ledger.record_debt([0], 1, dec!(10)).unwrap();

        let report = LedgerReport::from_ledger(&ledger, None).unwrap();
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["debts"][0]["debtor"], "a");
        assert_eq!(json["debts"][0]["lender"], "b");
        assert_eq!(json["debts"][0]["amount"], "10");
        assert_eq!(json["participants"][1]["status"], "CREDITOR");
        assert_eq!(json["participants"][2]["status"], "SETTLED");
        assert!(json.get("simplification").is_none());
        assert!(json.get("generated_at").is_some());
    }
}
