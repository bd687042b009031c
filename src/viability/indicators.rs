//! Summary indicators derived from a projected cash-flow sequence

use serde::{Deserialize, Serialize};

use super::CashflowMonth;
use crate::money::{round_div, Bps, Cents};

/// Scalar indicators summarizing one scenario's projection.
///
/// Wire field names follow the platform's persisted JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    /// First month the accumulated balance turns non-negative; `None` if the
    /// horizon ends still negative
    #[serde(rename = "paybackMes")]
    pub payback_month: Option<u32>,

    /// First month EBITDA turns non-negative, independent of payback
    #[serde(rename = "pontoEquilibrioMes")]
    pub break_even_month: Option<u32>,

    /// Mean EBITDA/revenue in basis points over months with positive revenue
    #[serde(rename = "margemEbitdaMedia")]
    pub avg_ebitda_margin_bps: Bps,

    #[serde(rename = "saldoFinal")]
    pub final_balance: Cents,

    #[serde(rename = "capexTotal")]
    pub total_capex: Cents,
}

/// Derive indicators from an ordered cash-flow sequence.
///
/// Always recomputed from the rows themselves, never carried over from
/// another scenario.
pub fn summarize(rows: &[CashflowMonth], total_capex: Cents) -> Indicators {
    let payback_month = rows.iter().find(|r| r.cash_balance >= 0).map(|r| r.month);
    let break_even_month = rows.iter().find(|r| r.ebitda >= 0).map(|r| r.month);

    // Months with zero revenue are excluded from the mean, not counted as 0%
    let mut margin_sum: i64 = 0;
    let mut margin_count: i64 = 0;
    for row in rows {
        if row.revenue > 0 {
            margin_sum += round_div(row.ebitda * 10_000, row.revenue);
            margin_count += 1;
        }
    }
    let avg_ebitda_margin_bps = if margin_count > 0 {
        round_div(margin_sum, margin_count)
    } else {
        0
    };

    let final_balance = rows
        .last()
        .map(|r| r.cash_balance)
        .unwrap_or(-total_capex);

    Indicators {
        payback_month,
        break_even_month,
        avg_ebitda_margin_bps,
        final_balance,
        total_capex,
    }
}
