//! Run a multi-scenario viability projection from a JSON input file
//!
//! Writes a projection report JSON for persistence and optional per-scenario
//! CSV files, then prints indicator summaries.

use std::fs;

use anyhow::Context;
use clap::Parser;
use finproj::scenario::{simulate_scenarios, ProjectionReport, ScenarioConfig};
use finproj::viability::BusinessInput;

#[derive(Debug, Parser)]
#[command(about = "Business viability projection with Base/Conservative/Optimistic scenarios")]
struct Args {
    /// BusinessInput JSON file
    input: String,

    /// Report JSON output path
    #[arg(long, default_value = "projection_report.json")]
    output: String,

    /// Also write one cash-flow CSV per scenario, using this prefix
    #[arg(long)]
    csv_prefix: Option<String>,

    /// Legacy single-scenario mode: run Base only
    #[arg(long)]
    single: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input))?;
    let input: BusinessInput =
        serde_json::from_str(&raw).context("failed to parse business input")?;

    let config = ScenarioConfig {
        automatic: !args.single,
        ..Default::default()
    };
    let results = simulate_scenarios(&input, &config).context("projection failed")?;

    if let Some(prefix) = &args.csv_prefix {
        for result in &results {
            let path = format!("{}_{:?}.csv", prefix, result.scenario).to_lowercase();
            let mut writer = csv::Writer::from_path(&path)
                .with_context(|| format!("failed to create {path}"))?;
            for row in &result.cash_flow {
                writer.serialize(row)?;
            }
            writer.flush()?;
            println!("Cash flow written to {path}");
        }
    }

    println!("\nScenario Summary:");
    for result in &results {
        let ind = &result.indicators;
        println!("  {:?}:", result.scenario);
        match ind.payback_month {
            Some(m) => println!("    Payback:      month {m}"),
            None => println!("    Payback:      not reached"),
        }
        match ind.break_even_month {
            Some(m) => println!("    Break-even:   month {m}"),
            None => println!("    Break-even:   not reached"),
        }
        println!(
            "    Avg margin:   {:.2}%",
            ind.avg_ebitda_margin_bps as f64 / 100.0
        );
        println!(
            "    Final balance: {:.2}",
            ind.final_balance as f64 / 100.0
        );
    }

    let report = ProjectionReport::new(results);
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&args.output, json)
        .with_context(|| format!("failed to write {}", args.output))?;
    println!("\nReport written to {}", args.output);

    Ok(())
}
