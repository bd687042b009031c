//! Parser for persisted projection results
//!
//! Two shapes exist in storage. The current format is an array of
//! `{scenario, fluxoCaixa, indicadores}` objects. Before multi-scenario
//! support, results were persisted as a bare array of month rows with the
//! indicators object stored alongside; that legacy shape degrades to a
//! single synthetic Base scenario whose indicators are recomputed from the
//! rows. Detection works by sniffing for a `scenario` key on the first
//! element.
//!
//! TODO: stamp persisted reports with an explicit schema version so this
//! shape-sniffing can be retired.

use serde_json::Value;

use super::{ScenarioKind, ScenarioResult};
use crate::error::{EngineError, EngineResult};
use crate::viability::{summarize, CashflowMonth};

/// Decode a persisted payload in either supported shape.
///
/// Accepts the current scenario array, the legacy bare month-row array, and
/// the legacy wrapped object `{fluxoCaixa, indicadores}`. Legacy shapes
/// yield exactly one Base-tagged scenario; their indicators are always
/// recomputed from the rows rather than trusted from storage.
pub fn parse_persisted(value: &Value) -> EngineResult<Vec<ScenarioResult>> {
    match value {
        Value::Array(items) => {
            let first = items.first().ok_or_else(|| {
                EngineError::Parse("persisted payload is an empty array".into())
            })?;
            if first.get("scenario").is_some() {
                let results: Vec<ScenarioResult> = serde_json::from_value(value.clone())?;
                Ok(results)
            } else {
                let rows: Vec<CashflowMonth> = serde_json::from_value(value.clone())?;
                Ok(vec![synthetic_base(rows)])
            }
        }
        Value::Object(map) => {
            let rows_value = map.get("fluxoCaixa").ok_or_else(|| {
                EngineError::Parse("object payload is missing fluxoCaixa".into())
            })?;
            let rows: Vec<CashflowMonth> = serde_json::from_value(rows_value.clone())?;
            Ok(vec![synthetic_base(rows)])
        }
        _ => Err(EngineError::Parse(
            "expected an array or an object payload".into(),
        )),
    }
}

/// Wrap legacy month rows as a Base scenario with recomputed indicators.
///
/// The original CAPEX is not stored with the legacy rows; it is recovered
/// from the first month, where balance = -capex + ebitda.
fn synthetic_base(rows: Vec<CashflowMonth>) -> ScenarioResult {
    let total_capex = rows
        .first()
        .map(|r| r.ebitda - r.cash_balance)
        .unwrap_or(0);
    let indicators = summarize(&rows, total_capex);
    ScenarioResult {
        scenario: ScenarioKind::Base,
        cash_flow: rows,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{simulate_scenarios, ScenarioConfig};
    use crate::viability::{BusinessInput, CapexItem, ClientRamp, OpexItem, RevenueLine};

    fn base_input() -> BusinessInput {
        BusinessInput {
            capex: vec![CapexItem {
                name: "setup".into(),
                amount_cents: 1_000_000,
            }],
            opex: vec![OpexItem {
                name: "payroll".into(),
                monthly_cents: 80_000,
                annual_readjustment_bps: 0,
            }],
            revenue: vec![RevenueLine {
                name: "subscription".into(),
                unit_price_cents: 5_000,
                monthly_volume: 1,
                monthly_growth_bps: 0,
                cap_cents: None,
            }],
            ramp: ClientRamp {
                starting_clients: 5,
                monthly_growth_bps: 2_000,
                stabilization_month: 10,
                steady_state_clients: 50,
            },
            max_capacity: 60,
            horizon_months: 24,
        }
    }

    #[test]
    fn test_current_format_round_trip() {
        let results = simulate_scenarios(&base_input(), &ScenarioConfig::default()).unwrap();
        let value = serde_json::to_value(&results).unwrap();
        let parsed = parse_persisted(&value).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn test_legacy_bare_rows_degrade_to_base() {
        let config = ScenarioConfig {
            automatic: false,
            ..Default::default()
        };
        let standalone = simulate_scenarios(&base_input(), &config).unwrap();

        // Persist only the month rows, as the pre-scenario format did
        let value = serde_json::to_value(&standalone[0].cash_flow).unwrap();
        let parsed = parse_persisted(&value).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].scenario, ScenarioKind::Base);
        assert_eq!(parsed[0].indicators, standalone[0].indicators);
        assert_eq!(parsed[0].cash_flow, standalone[0].cash_flow);
    }

    #[test]
    fn test_legacy_wrapped_object_recomputes_indicators() {
        let config = ScenarioConfig {
            automatic: false,
            ..Default::default()
        };
        let standalone = simulate_scenarios(&base_input(), &config).unwrap();

        // Stale persisted indicators are ignored in favor of recomputation
        let value = serde_json::json!({
            "fluxoCaixa": standalone[0].cash_flow,
            "indicadores": { "paybackMes": 999 },
        });
        let parsed = parse_persisted(&value).unwrap();
        assert_eq!(parsed[0].indicators, standalone[0].indicators);
    }

    #[test]
    fn test_empty_array_is_rejected() {
        let err = parse_persisted(&serde_json::json!([])).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        assert!(parse_persisted(&serde_json::json!(42)).is_err());
        assert!(parse_persisted(&serde_json::json!("fluxo")).is_err());
    }

    #[test]
    fn test_malformed_rows_surface_parse_error() {
        let value = serde_json::json!([{ "mes": "not a number" }]);
        assert!(matches!(
            parse_persisted(&value).unwrap_err(),
            EngineError::Parse(_)
        ));
    }
}
