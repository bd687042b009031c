//! Generate an amortization schedule from command-line parameters
//!
//! Writes the schedule as CSV and prints a summary of totals

use anyhow::Context;
use clap::{Parser, ValueEnum};
use finproj::loan;
use finproj::{AmortizationMethod, CapitalizationMode, DayCount, LoanInput, RatePeriod};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Linear,
    Bullet,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CapitalizationArg {
    Simple,
    Compound,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RatePeriodArg {
    Annual,
    Monthly,
}

#[derive(Debug, Parser)]
#[command(about = "Amortization schedule generator for capital raises")]
struct Args {
    /// Principal in minor currency units (cents)
    #[arg(long)]
    principal: i64,

    /// Nominal rate in basis points (1800 = 18%)
    #[arg(long)]
    rate_bps: i64,

    #[arg(long, value_enum, default_value = "annual")]
    rate_period: RatePeriodArg,

    /// Term in months
    #[arg(long)]
    term: u32,

    #[arg(long, default_value_t = 0)]
    interest_grace: u32,

    #[arg(long, default_value_t = 0)]
    principal_grace: u32,

    /// Capitalize interest accrued during the grace window
    #[arg(long)]
    capitalize_grace: bool,

    #[arg(long, value_enum, default_value = "linear")]
    method: MethodArg,

    #[arg(long, value_enum, default_value = "compound")]
    capitalization: CapitalizationArg,

    /// Output CSV path
    #[arg(long, default_value = "schedule.csv")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = LoanInput {
        principal_cents: args.principal,
        rate_bps: args.rate_bps,
        rate_period: match args.rate_period {
            RatePeriodArg::Annual => RatePeriod::Annual,
            RatePeriodArg::Monthly => RatePeriod::Monthly,
        },
        term_months: args.term,
        interest_grace_months: args.interest_grace,
        principal_grace_months: args.principal_grace,
        capitalize_interest_in_grace: args.capitalize_grace,
        method: match args.method {
            MethodArg::Linear => AmortizationMethod::Linear,
            MethodArg::Bullet => AmortizationMethod::Bullet,
        },
        capitalization: match args.capitalization {
            CapitalizationArg::Simple => CapitalizationMode::Simple,
            CapitalizationArg::Compound => CapitalizationMode::Compound,
        },
        day_count: DayCount::Thirty360,
    };

    let rows = loan::simulate(&input).context("schedule generation failed")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Schedule written to {}", args.output);

    let total_interest: i64 = rows.iter().map(|r| r.interest).sum();
    let total_paid: i64 = rows.iter().map(|r| r.payment).sum();
    println!("\nSchedule Summary:");
    println!("  Months:         {}", rows.len());
    println!(
        "  First payment:  {:.2}",
        rows[0].payment as f64 / 100.0
    );
    println!(
        "  Total interest: {:.2}",
        total_interest as f64 / 100.0
    );
    println!("  Total paid:     {:.2}", total_paid as f64 / 100.0);
    println!(
        "  Final balance:  {:.2}",
        rows.last().map(|r| r.closing_balance).unwrap_or(0) as f64 / 100.0
    );

    Ok(())
}
