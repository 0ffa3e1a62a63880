use serde::{Deserialize, Serialize};

/// Per-member financial totals, in whole rupiah.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    #[serde(rename = "totalSimpanan")]
    pub savings: i64,
    /// Remaining principal on open loans.
    #[serde(rename = "totalPinjaman")]
    pub outstanding_loan: i64,
    #[serde(rename = "totalAngsuran")]
    pub installments_paid: i64,
    #[serde(rename = "totalTunggakan")]
    pub arrears: i64,
    #[serde(rename = "totalSHU")]
    pub shu: i64,
}

impl FinancialSummary {
    /// Everything ever borrowed: what is still owed plus what has been repaid.
    pub fn total_loan(&self) -> i64 {
        self.outstanding_loan + self.installments_paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_loan_includes_repaid_installments() {
        let summary = FinancialSummary {
            outstanding_loan: 3_000_000,
            installments_paid: 2_000_000,
            ..Default::default()
        };
        assert_eq!(summary.total_loan(), 5_000_000);
    }
}
