//! Loan parameters and amortization schedule generation
//!
//! A capital raise is described by an immutable [`LoanInput`]; the engine in
//! [`schedule`] turns it into a month-by-month sequence of [`LoanMonth`]
//! records. Monetary values are integer cents, rates are basis points.

mod schedule;

pub use schedule::{simulate, LoanMonth};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::{bps_to_fraction, Bps, Cents};

/// How the principal is repaid after any grace window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationMethod {
    /// SAC: constant amortization portion each month, declining interest
    Linear,
    /// Full principal repaid in the single final installment
    Bullet,
}

/// Interest accrual convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalizationMode {
    /// Pro-rata monthly share of the annual rate
    Simple,
    /// Effective monthly rate: `(1 + annual)^(1/12) - 1`
    Compound,
}

/// Period the quoted rate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatePeriod {
    Annual,
    Monthly,
}

/// Day-count basis for the simple-capitalization monthly rate.
///
/// Compound mode is calendar-monthly and ignores the basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCount {
    /// 30/360: each month is exactly 1/12 of the year
    #[serde(rename = "30/360")]
    Thirty360,
    /// Actual/365 with a 30-day accrual month
    #[serde(rename = "actual/365")]
    Actual365,
}

impl DayCount {
    /// Fraction of the year one accrual month represents
    pub fn monthly_fraction(&self) -> f64 {
        match self {
            DayCount::Thirty360 => 30.0 / 360.0,
            DayCount::Actual365 => 30.0 / 365.0,
        }
    }
}

fn default_day_count() -> DayCount {
    DayCount::Thirty360
}

fn default_rate_period() -> RatePeriod {
    RatePeriod::Annual
}

/// Immutable description of a capital raise to be amortized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Principal in minor currency units (cents)
    pub principal_cents: Cents,

    /// Nominal rate in basis points (1800 = 18%)
    pub rate_bps: Bps,

    /// Whether `rate_bps` is quoted per year or per month
    #[serde(default = "default_rate_period")]
    pub rate_period: RatePeriod,

    /// Schedule length in months
    pub term_months: u32,

    /// Months in which interest is either paid out alone or capitalized
    #[serde(default)]
    pub interest_grace_months: u32,

    /// Months in which no principal is amortized
    #[serde(default)]
    pub principal_grace_months: u32,

    /// During the interest grace window, roll accrued interest into the
    /// balance instead of paying it out monthly
    #[serde(default)]
    pub capitalize_interest_in_grace: bool,

    pub method: AmortizationMethod,

    pub capitalization: CapitalizationMode,

    #[serde(default = "default_day_count")]
    pub day_count: DayCount,
}

impl LoanInput {
    /// Validate ranges before any simulation step runs
    pub fn validate(&self) -> EngineResult<()> {
        if self.term_months == 0 {
            return Err(EngineError::validation(
                "term_months",
                "term must be at least 1 month",
            ));
        }
        if self.principal_cents <= 0 {
            return Err(EngineError::validation(
                "principal_cents",
                "principal must be positive",
            ));
        }
        if self.rate_bps < 0 {
            return Err(EngineError::validation(
                "rate_bps",
                "rate cannot be negative",
            ));
        }
        if self.interest_grace_months >= self.term_months {
            return Err(EngineError::validation(
                "interest_grace_months",
                "interest grace must be shorter than the term",
            ));
        }
        if self.principal_grace_months >= self.term_months {
            return Err(EngineError::validation(
                "principal_grace_months",
                "principal grace must be shorter than the term",
            ));
        }
        Ok(())
    }

    /// Last month of the combined grace window (0 when there is none)
    pub fn grace_end(&self) -> u32 {
        self.interest_grace_months.max(self.principal_grace_months)
    }

    /// Per-month rate as a fraction, normalized for the capitalization mode
    /// and day-count basis
    pub fn monthly_rate(&self) -> f64 {
        let quoted = bps_to_fraction(self.rate_bps);
        match self.rate_period {
            RatePeriod::Monthly => quoted,
            RatePeriod::Annual => match self.capitalization {
                CapitalizationMode::Simple => quoted * self.day_count.monthly_fraction(),
                CapitalizationMode::Compound => (1.0 + quoted).powf(1.0 / 12.0) - 1.0,
            },
        }
    }
}
