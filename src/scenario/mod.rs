//! Multi-scenario orchestration
//!
//! Derives Conservative and Optimistic variants from a Base business input
//! by applying configurable multipliers to growth rates and pricing, runs
//! each variant through the viability engine in isolation, and tags the
//! results in fixed order: Base, Conservative, Optimistic.

mod parse;

pub use parse::parse_persisted;

use chrono::{DateTime, Utc};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::money::{scale_by_bps, Bps};
use crate::viability::{self, BusinessInput, CashflowMonth, Indicators};

/// Scenario tag, serialized in the persisted result format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Base,
    Conservative,
    Optimistic,
}

/// Multipliers (in bps, 10_000 = unchanged) applied to the Base input when
/// deriving the automatic variants.
///
/// Defaults: Conservative cuts growth 20% and pricing 10%; Optimistic adds
/// 20% growth and 10% pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDeltas {
    #[serde(default = "default_conservative_growth")]
    pub conservative_growth_bps: Bps,
    #[serde(default = "default_conservative_price")]
    pub conservative_price_bps: Bps,
    #[serde(default = "default_optimistic_growth")]
    pub optimistic_growth_bps: Bps,
    #[serde(default = "default_optimistic_price")]
    pub optimistic_price_bps: Bps,
}

fn default_conservative_growth() -> Bps { 8_000 }
fn default_conservative_price() -> Bps { 9_000 }
fn default_optimistic_growth() -> Bps { 12_000 }
fn default_optimistic_price() -> Bps { 11_000 }

impl Default for ScenarioDeltas {
    fn default() -> Self {
        Self {
            conservative_growth_bps: default_conservative_growth(),
            conservative_price_bps: default_conservative_price(),
            optimistic_growth_bps: default_optimistic_growth(),
            optimistic_price_bps: default_optimistic_price(),
        }
    }
}

fn default_automatic() -> bool {
    true
}

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// When false, only the Base scenario is produced (legacy
    /// single-scenario mode)
    #[serde(default = "default_automatic")]
    pub automatic: bool,

    #[serde(default)]
    pub deltas: ScenarioDeltas,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            automatic: true,
            deltas: ScenarioDeltas::default(),
        }
    }
}

/// One scenario's full projection plus its derived indicators.
///
/// Wire field names follow the platform's persisted JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: ScenarioKind,

    #[serde(rename = "fluxoCaixa")]
    pub cash_flow: Vec<CashflowMonth>,

    #[serde(rename = "indicadores")]
    pub indicators: Indicators,
}

/// Persistence envelope handed to the excluded storage layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    #[serde(rename = "geradoEm")]
    pub generated_at: DateTime<Utc>,

    #[serde(rename = "cenarios")]
    pub scenarios: Vec<ScenarioResult>,
}

impl ProjectionReport {
    pub fn new(scenarios: Vec<ScenarioResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            scenarios,
        }
    }
}

/// Derive a variant of the Base input by scaling growth rates and pricing
fn derive_variant(base: &BusinessInput, growth_bps: Bps, price_bps: Bps) -> BusinessInput {
    let mut variant = base.clone();
    variant.ramp.monthly_growth_bps = scale_by_bps(variant.ramp.monthly_growth_bps, growth_bps);
    for line in &mut variant.revenue {
        line.monthly_growth_bps = scale_by_bps(line.monthly_growth_bps, growth_bps);
        line.unit_price_cents = scale_by_bps(line.unit_price_cents, price_bps);
    }
    variant
}

fn run_one(kind: ScenarioKind, input: &BusinessInput) -> EngineResult<ScenarioResult> {
    let cash_flow = viability::simulate(input)?;
    let indicators = viability::summarize(&cash_flow, input.total_capex());
    Ok(ScenarioResult {
        scenario: kind,
        cash_flow,
        indicators,
    })
}

/// Run the Base scenario plus the automatically derived variants.
///
/// Each scenario runs through the viability engine independently; no state
/// is shared across them. Results come back in fixed order: Base,
/// Conservative, Optimistic (or Base alone when `automatic` is off).
pub fn simulate_scenarios(
    input: &BusinessInput,
    config: &ScenarioConfig,
) -> EngineResult<Vec<ScenarioResult>> {
    // Fail before spawning any scenario work
    input.validate()?;

    if !config.automatic {
        info!("automatic scenarios disabled, running Base only");
        return Ok(vec![run_one(ScenarioKind::Base, input)?]);
    }

    let deltas = &config.deltas;
    let variants = vec![
        (ScenarioKind::Base, input.clone()),
        (
            ScenarioKind::Conservative,
            derive_variant(input, deltas.conservative_growth_bps, deltas.conservative_price_bps),
        ),
        (
            ScenarioKind::Optimistic,
            derive_variant(input, deltas.optimistic_growth_bps, deltas.optimistic_price_bps),
        ),
    ];

    info!("running {} scenarios over {} months", variants.len(), input.horizon_months);
    variants
        .par_iter()
        .map(|(kind, variant)| run_one(*kind, variant))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viability::{CapexItem, ClientRamp, OpexItem, RevenueLine};

    fn base_input() -> BusinessInput {
        BusinessInput {
            capex: vec![CapexItem {
                name: "setup".into(),
                amount_cents: 2_000_000,
            }],
            opex: vec![OpexItem {
                name: "payroll".into(),
                monthly_cents: 150_000,
                annual_readjustment_bps: 500,
            }],
            revenue: vec![RevenueLine {
                name: "subscription".into(),
                unit_price_cents: 10_000,
                monthly_volume: 1,
                monthly_growth_bps: 100,
                cap_cents: None,
            }],
            ramp: ClientRamp {
                starting_clients: 10,
                monthly_growth_bps: 1_500,
                stabilization_month: 18,
                steady_state_clients: 60,
            },
            max_capacity: 100,
            horizon_months: 36,
        }
    }

    #[test]
    fn test_three_scenarios_in_fixed_order() {
        let results = simulate_scenarios(&base_input(), &ScenarioConfig::default()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].scenario, ScenarioKind::Base);
        assert_eq!(results[1].scenario, ScenarioKind::Conservative);
        assert_eq!(results[2].scenario, ScenarioKind::Optimistic);
    }

    #[test]
    fn test_single_scenario_legacy_mode() {
        let config = ScenarioConfig {
            automatic: false,
            ..Default::default()
        };
        let results = simulate_scenarios(&base_input(), &config).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scenario, ScenarioKind::Base);
    }

    #[test]
    fn test_scenario_isolation() {
        let input = base_input();
        let base_alone = simulate_scenarios(
            &input,
            &ScenarioConfig {
                automatic: false,
                ..Default::default()
            },
        )
        .unwrap();

        let all = simulate_scenarios(&input, &ScenarioConfig::default()).unwrap();

        // Running the variants never perturbs the Base scenario's output
        assert_eq!(all[0], base_alone[0]);
    }

    #[test]
    fn test_conservative_never_beats_optimistic() {
        let results = simulate_scenarios(&base_input(), &ScenarioConfig::default()).unwrap();
        let conservative = &results[1].indicators;
        let optimistic = &results[2].indicators;
        assert!(conservative.final_balance <= optimistic.final_balance);
    }

    #[test]
    fn test_variant_derivation_scales_growth_and_price() {
        let input = base_input();
        let variant = derive_variant(&input, 8_000, 9_000);
        assert_eq!(variant.ramp.monthly_growth_bps, 1_200);
        assert_eq!(variant.revenue[0].monthly_growth_bps, 80);
        assert_eq!(variant.revenue[0].unit_price_cents, 9_000);
        // CAPEX and OPEX are untouched by the deltas
        assert_eq!(variant.capex, input.capex);
        assert_eq!(variant.opex, input.opex);
    }

    #[test]
    fn test_invalid_input_fails_before_any_scenario_runs() {
        let mut input = base_input();
        input.max_capacity = 1;
        assert!(simulate_scenarios(&input, &ScenarioConfig::default()).is_err());
    }

    #[test]
    fn test_indicators_recomputed_per_scenario() {
        let results = simulate_scenarios(&base_input(), &ScenarioConfig::default()).unwrap();
        for result in &results {
            let recomputed =
                viability::summarize(&result.cash_flow, result.indicators.total_capex);
            assert_eq!(result.indicators, recomputed);
        }
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let results = simulate_scenarios(&base_input(), &ScenarioConfig::default()).unwrap();
        let report = ProjectionReport::new(results);
        let json = serde_json::to_string(&report).unwrap();
        let back: ProjectionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scenarios, report.scenarios);
    }
}
