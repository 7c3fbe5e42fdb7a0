//! Compute estimates for every claim in a CSV file
//!
//! Input columns: contingency,base_wage_index,age,disability_percent,in_itinere[,reference_date]
//! Output: one row per claim with the breakdown (blank for notice contingencies)
//! and the rejection message for invalid rows.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use srt_calculator::calculator::{CalculationResult, CompensationCalculator};
use srt_calculator::claim::{load_claims, CalculationRequest};
use srt_calculator::index::{IndexConfig, ResolvedIndex, RipteClient, DEFAULT_INDEX_URL};
use srt_calculator::parameters::loader::load_or_default;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "run_batch", version, about = "Batch SRT compensation estimates from CSV")]
struct Args {
    /// Claims CSV
    input: PathBuf,

    #[arg(long, default_value = "srt_batch_output.csv")]
    output: PathBuf,

    /// Use this reference index instead of fetching it
    #[arg(long)]
    reference_index: Option<f64>,

    #[arg(long, env = "SRT_INDEX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "SRT_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    index_url: String,

    #[arg(long, env = "SRT_INDEX_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[arg(long, env = "SRT_PARAMETERS")]
    parameters: Option<PathBuf>,
}

/// One output row
#[derive(Debug, Default, serde::Serialize)]
struct BatchRow {
    row: usize,
    contingency: String,
    capital: Option<f64>,
    floor_amount: Option<f64>,
    supplementary_capital: Option<f64>,
    additional_percentage_amount: Option<f64>,
    total: Option<f64>,
    notice: Option<String>,
    error: Option<String>,
}

/// Compute one claim and flatten it into an output row
fn to_row(
    row: usize,
    claim: srt_calculator::Result<CalculationRequest>,
    calculator: &CompensationCalculator,
    index: &ResolvedIndex,
    today: NaiveDate,
) -> BatchRow {
    let mut out = BatchRow { row, ..Default::default() };

    let claim = match claim {
        Ok(claim) => claim,
        Err(e) => {
            out.error = Some(e.to_string());
            return out;
        }
    };
    out.contingency = claim.contingency.key().to_string();

    let outcome = claim
        .into_input(index.value, today)
        .and_then(|input| calculator.compute(&input));
    match outcome {
        Ok(CalculationResult::Formula(b)) => {
            out.capital = Some(b.capital);
            out.floor_amount = Some(b.floor_amount);
            out.supplementary_capital = Some(b.supplementary_capital);
            out.additional_percentage_amount = Some(b.additional_percentage_amount);
            out.total = Some(b.total);
        }
        Ok(CalculationResult::Informational(n)) => out.notice = Some(n.guidance),
        Ok(CalculationResult::Guidance(n)) => out.notice = Some(n.guidance),
        Err(e) => out.error = Some(e.to_string()),
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let params = load_or_default(args.parameters.as_ref()).context("Failed to load legal parameters")?;
    let calculator = CompensationCalculator::new(params);

    let claims = load_claims(&args.input)
        .with_context(|| format!("Failed to load claims from {}", args.input.display()))?;
    info!("Loaded {} claims in {:?}", claims.len(), start.elapsed());

    let index = match args.reference_index {
        Some(value) => ResolvedIndex::manual(value),
        None => {
            RipteClient::new(IndexConfig {
                url: args.index_url.clone(),
                token: args.token.clone(),
                timeout: Duration::from_secs(args.timeout_secs),
            })
            .resolve()
            .await
        }
    };
    if let Some(note) = index.fallback_note() {
        warn!("{}", note);
    }

    let today = Local::now().date_naive();
    let rows: Vec<BatchRow> = claims
        .into_par_iter()
        .map(|(row, claim)| to_row(row, claim, &calculator, &index, today))
        .collect();

    let rejected = rows.iter().filter(|r| r.error.is_some()).count();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "{} claims written to {} ({} rejected) in {:?}",
        rows.len(),
        args.output.display(),
        rejected,
        start.elapsed()
    );
    Ok(())
}
