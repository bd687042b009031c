//! Forward monthly cash-flow simulation

use log::debug;
use serde::{Deserialize, Serialize};

use super::BusinessInput;
use crate::error::EngineResult;
use crate::money::{round_div, scale_by_bps, Cents, BPS_SCALE};

/// One row of a viability projection.
///
/// Wire field names follow the platform's persisted JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowMonth {
    #[serde(rename = "mes")]
    pub month: u32,

    #[serde(rename = "receita")]
    pub revenue: Cents,

    #[serde(rename = "custos")]
    pub costs: Cents,

    #[serde(rename = "ebitda")]
    pub ebitda: Cents,

    #[serde(rename = "saldoAcumulado")]
    pub cash_balance: Cents,

    #[serde(rename = "clientesAtivos")]
    pub active_clients: u32,
}

/// Project the business month by month over its horizon.
///
/// Deterministic and pure: one [`CashflowMonth`] per month 1..=horizon, in
/// order. The accumulated balance starts at minus total CAPEX (a single
/// month-0 outflow) and adds each month's EBITDA.
pub fn simulate(input: &BusinessInput) -> EngineResult<Vec<CashflowMonth>> {
    input.validate()?;

    let total_capex = input.total_capex();
    let ceiling = input.client_ceiling();
    debug!(
        "viability projection: {} months, capex {}, client ceiling {}",
        input.horizon_months, total_capex, ceiling
    );

    let mut clients = input.ramp.starting_clients.min(ceiling);
    // The count is carried at bps precision so that sub-client monthly
    // increments accumulate instead of being lost to integer rounding
    let ceiling_scaled = ceiling as i64 * BPS_SCALE;
    let mut clients_scaled = clients as i64 * BPS_SCALE;
    // Per-client monthly amount of each revenue line, grown in place
    let mut line_amounts: Vec<Cents> = input.revenue.iter().map(|l| l.base_amount()).collect();
    let mut opex_costs: Vec<Cents> = input.opex.iter().map(|o| o.monthly_cents).collect();
    let mut balance = -total_capex;
    let mut rows = Vec::with_capacity(input.horizon_months as usize);

    for month in 1..=input.horizon_months {
        if month > 1 {
            // Client ramp grows toward the ceiling; growth is non-negative by
            // validation, so the count never decreases.
            if month >= input.ramp.stabilization_month {
                clients = ceiling;
            } else {
                clients_scaled =
                    scale_by_bps(clients_scaled, BPS_SCALE + input.ramp.monthly_growth_bps)
                        .min(ceiling_scaled);
                let grown = round_div(clients_scaled, BPS_SCALE) as u32;
                clients = grown.max(clients).min(ceiling);
            }

            // Per-client revenue compounds monthly, capped per line
            for (amount, line) in line_amounts.iter_mut().zip(&input.revenue) {
                *amount = scale_by_bps(*amount, BPS_SCALE + line.monthly_growth_bps);
                if let Some(cap) = line.cap_cents {
                    *amount = (*amount).min(cap);
                }
            }

            // Annual OPEX readjustment lands on months 13, 25, ...
            if (month - 1) % 12 == 0 {
                for (cost, item) in opex_costs.iter_mut().zip(&input.opex) {
                    *cost = scale_by_bps(*cost, BPS_SCALE + item.annual_readjustment_bps);
                }
            }
        } else if input.ramp.stabilization_month == 1 {
            clients = ceiling;
        }

        let revenue: Cents = line_amounts.iter().map(|a| a * clients as i64).sum();
        let costs: Cents = opex_costs.iter().sum();
        let ebitda = revenue - costs;
        balance += ebitda;

        rows.push(CashflowMonth {
            month,
            revenue,
            costs,
            ebitda,
            cash_balance: balance,
            active_clients: clients,
        });
    }

    Ok(rows)
}
