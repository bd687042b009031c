//! Forward monthly simulation of an amortization schedule

use log::debug;
use serde::{Deserialize, Serialize};

use super::{AmortizationMethod, LoanInput};
use crate::error::{EngineError, EngineResult};
use crate::money::{round_div, round_to_cents, Cents};

/// One row of an amortization schedule.
///
/// Wire field names follow the platform's persisted JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanMonth {
    #[serde(rename = "mes")]
    pub month: u32,

    #[serde(rename = "saldoInicial")]
    pub opening_balance: Cents,

    #[serde(rename = "juros")]
    pub interest: Cents,

    #[serde(rename = "amortizacao")]
    pub amortization: Cents,

    #[serde(rename = "parcela")]
    pub payment: Cents,

    #[serde(rename = "saldoFinal")]
    pub closing_balance: Cents,
}

/// Generate the full amortization schedule for a loan.
///
/// Deterministic and pure: one [`LoanMonth`] per month 1..=term, in order,
/// with the final closing balance forced to exactly zero. Validation runs
/// first; no partial schedule is ever returned.
pub fn simulate(input: &LoanInput) -> EngineResult<Vec<LoanMonth>> {
    input.validate()?;

    let grace_end = input.grace_end();
    let amortizable_months = input.term_months.saturating_sub(grace_end);
    if amortizable_months == 0 {
        // Guarded separately from validation: a schedule with no month left
        // to amortize cannot be generated at all.
        return Err(EngineError::InvalidSchedule(
            "no amortizable months after grace window".into(),
        ));
    }

    let rate = input.monthly_rate();
    debug!(
        "amortization schedule: {} months, grace through month {}, monthly rate {:.6}",
        input.term_months, grace_end, rate
    );

    let mut balance = input.principal_cents;
    let mut fixed_amortization: Option<Cents> = None;
    let mut rows = Vec::with_capacity(input.term_months as usize);

    for month in 1..=input.term_months {
        let opening = balance;
        let interest = round_to_cents(balance as f64 * rate);
        let is_final = month == input.term_months;

        let mut capitalized: Cents = 0;
        let amortization: Cents;
        let payment: Cents;

        if month <= input.interest_grace_months {
            amortization = 0;
            if input.capitalize_interest_in_grace {
                capitalized = interest;
                payment = 0;
            } else {
                payment = interest;
            }
        } else if month <= grace_end {
            // Principal grace: interest is paid, nothing amortizes
            amortization = 0;
            payment = interest;
        } else {
            amortization = match input.method {
                AmortizationMethod::Bullet => {
                    if is_final {
                        balance
                    } else {
                        0
                    }
                }
                AmortizationMethod::Linear => {
                    // Constant portion fixed at amortization start; the final
                    // month absorbs the rounding residue by paying the exact
                    // remaining balance.
                    let portion = *fixed_amortization
                        .get_or_insert_with(|| round_div(balance, amortizable_months as i64));
                    if is_final {
                        balance
                    } else {
                        portion.min(balance)
                    }
                }
            };
            payment = interest + amortization;
        }

        balance = opening + capitalized - amortization;
        rows.push(LoanMonth {
            month,
            opening_balance: opening,
            interest,
            amortization,
            payment,
            closing_balance: balance,
        });
    }

    Ok(rows)
}
