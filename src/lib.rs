//! Financial projection engine for a tokenized-investment marketplace
//!
//! This library provides:
//! - Amortization schedules for capital raises (linear/SAC and bullet,
//!   grace periods, simple or compound accrual)
//! - Month-by-month business viability projections (CAPEX/OPEX, revenue
//!   lines, client ramp) with payback/break-even/margin indicators
//! - Multi-scenario orchestration (Base/Conservative/Optimistic) with
//!   configurable parameter deltas
//! - A parser for persisted results covering both the current and the
//!   legacy single-scenario storage formats
//!
//! All money is integer minor currency units and all rates are fixed-point
//! basis points; every computation is pure and deterministic.

pub mod error;
pub mod loan;
pub mod money;
pub mod scenario;
pub mod viability;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use loan::{
    AmortizationMethod, CapitalizationMode, DayCount, LoanInput, LoanMonth, RatePeriod,
};
pub use scenario::{
    parse_persisted, simulate_scenarios, ProjectionReport, ScenarioConfig, ScenarioKind,
    ScenarioResult,
};
pub use viability::{BusinessInput, CashflowMonth, Indicators};

#[cfg(test)]
mod tests {
    use crate::{AmortizationMethod, CapitalizationMode, DayCount, RatePeriod};

    #[test]
    fn test_loan_enums_reexported_at_crate_root() {
        let _ = (
            AmortizationMethod::Linear,
            CapitalizationMode::Compound,
            RatePeriod::Annual,
            DayCount::Thirty360,
        );
    }
}
