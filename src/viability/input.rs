//! Business parameters for the viability projection

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::{Bps, Cents};

/// One-time investment item, applied as a month-0 outflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapexItem {
    pub name: String,
    pub amount_cents: Cents,
}

/// Monthly recurring cost line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpexItem {
    pub name: String,
    pub monthly_cents: Cents,

    /// Readjustment applied to this line every 12 months (months 13, 25, ...)
    #[serde(default)]
    pub annual_readjustment_bps: Bps,
}

/// Revenue line, priced per client per month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueLine {
    pub name: String,

    /// Price per unit in cents
    pub unit_price_cents: Cents,

    /// Units consumed per client per month
    pub monthly_volume: i64,

    /// Monthly compounding growth of the per-client amount
    #[serde(default)]
    pub monthly_growth_bps: Bps,

    /// Ceiling on the grown per-client monthly amount
    #[serde(default)]
    pub cap_cents: Option<Cents>,
}

impl RevenueLine {
    /// Per-client monthly amount before any growth is applied
    pub fn base_amount(&self) -> Cents {
        self.unit_price_cents * self.monthly_volume
    }
}

/// Client acquisition curve: compounding growth until stabilization, then
/// a fixed steady state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRamp {
    pub starting_clients: u32,
    pub monthly_growth_bps: Bps,
    pub stabilization_month: u32,
    pub steady_state_clients: u32,
}

/// Immutable description of a business to be projected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInput {
    pub capex: Vec<CapexItem>,
    pub opex: Vec<OpexItem>,
    pub revenue: Vec<RevenueLine>,
    pub ramp: ClientRamp,

    /// Hard ceiling on active clients regardless of the ramp
    pub max_capacity: u32,

    pub horizon_months: u32,
}

impl BusinessInput {
    /// Validate ranges before any simulation step runs
    pub fn validate(&self) -> EngineResult<()> {
        if self.horizon_months == 0 {
            return Err(EngineError::validation(
                "horizon_months",
                "projection horizon must be at least 1 month",
            ));
        }
        for item in &self.capex {
            if item.amount_cents < 0 {
                return Err(EngineError::validation(
                    format!("capex:{}", item.name),
                    "amount cannot be negative",
                ));
            }
        }
        for item in &self.opex {
            if item.monthly_cents < 0 {
                return Err(EngineError::validation(
                    format!("opex:{}", item.name),
                    "monthly cost cannot be negative",
                ));
            }
            if item.annual_readjustment_bps < 0 {
                return Err(EngineError::validation(
                    format!("opex:{}", item.name),
                    "readjustment cannot be negative",
                ));
            }
        }
        for line in &self.revenue {
            if line.unit_price_cents < 0 {
                return Err(EngineError::validation(
                    format!("revenue:{}", line.name),
                    "unit price cannot be negative",
                ));
            }
            if line.monthly_volume < 0 {
                return Err(EngineError::validation(
                    format!("revenue:{}", line.name),
                    "monthly volume cannot be negative",
                ));
            }
            if line.monthly_growth_bps < 0 {
                return Err(EngineError::validation(
                    format!("revenue:{}", line.name),
                    "growth cannot be negative",
                ));
            }
        }
        if self.ramp.monthly_growth_bps < 0 {
            return Err(EngineError::validation(
                "ramp.monthly_growth_bps",
                "client growth cannot be negative",
            ));
        }
        if self.ramp.stabilization_month == 0 {
            return Err(EngineError::validation(
                "ramp.stabilization_month",
                "stabilization month must be at least 1",
            ));
        }
        if self.max_capacity < self.ramp.starting_clients {
            // Never silently clamp the starting base upward or downward
            return Err(EngineError::validation(
                "max_capacity",
                "capacity ceiling is below the starting client count",
            ));
        }
        Ok(())
    }

    /// Sum of all one-time investment items
    pub fn total_capex(&self) -> Cents {
        self.capex.iter().map(|c| c.amount_cents).sum()
    }

    /// Upper bound on active clients: the lower of the capacity ceiling and
    /// the ramp's steady state
    pub fn client_ceiling(&self) -> u32 {
        self.max_capacity.min(self.ramp.steady_state_clients)
    }
}
