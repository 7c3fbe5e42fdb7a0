//! Estimate the compensation for one claim
//!
//! Example:
//!   srt_calc partial_high --wage 100000 --age 65 --disability 60
//!   srt_calc death --wage 50000 --age 40 --in-itinere --reference-index 2.0

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use srt_calculator::calculator::CompensationCalculator;
use srt_calculator::claim::{CalculationRequest, ContingencyType};
use srt_calculator::index::{IndexConfig, ResolvedIndex, RipteClient, DEFAULT_INDEX_URL};
use srt_calculator::parameters::loader::load_or_default;
use srt_calculator::presentation::{render_report, ContactLink, DISCLAIMER};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "srt_calc", version, about = "Calculadora de indemnización (SRT) - Ley 26.773 y 27.348")]
struct Args {
    /// partial_low, partial_high, total, great_invalidity, death or temporary_incapacity (ilt)
    contingency: ContingencyType,

    /// Base wage index (VIB with RIPTE), in pesos
    #[arg(long, default_value_t = 0.0)]
    wage: f64,

    /// Age at the first disabling manifestation
    #[arg(long)]
    age: u32,

    /// Disability percentage (partial/total contingencies only)
    #[arg(long)]
    disability: Option<f64>,

    /// Accident during the commute
    #[arg(long)]
    in_itinere: bool,

    /// Date of the event (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Use this reference index instead of fetching it
    #[arg(long)]
    reference_index: Option<f64>,

    /// Bearer token for the statistics service
    #[arg(long, env = "SRT_INDEX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "SRT_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    index_url: String,

    #[arg(long, env = "SRT_INDEX_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// JSON file with revised legal parameters
    #[arg(long, env = "SRT_PARAMETERS")]
    parameters: Option<PathBuf>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = load_or_default(args.parameters.as_ref()).context("Failed to load legal parameters")?;
    let calculator = CompensationCalculator::new(params);

    let request = CalculationRequest {
        contingency: args.contingency,
        base_wage_index: args.wage,
        age: args.age,
        disability_percent: args.disability,
        in_itinere: args.in_itinere,
        reference_date: args.date,
    };
    request.validate().context("Invalid claim")?;

    let index = match args.reference_index {
        _ if !args.contingency.uses_reference_index() => ResolvedIndex::not_applicable(),
        Some(value) => ResolvedIndex::manual(value),
        None => {
            let client = RipteClient::new(IndexConfig {
                url: args.index_url.clone(),
                token: args.token.clone(),
                timeout: Duration::from_secs(args.timeout_secs),
            });
            client.resolve().await
        }
    };

    let input = request
        .into_input(index.value, Local::now().date_naive())
        .context("Invalid claim")?;
    let result = calculator.compute(&input).context("Calculation failed")?;

    let contact = ContactLink::default();
    if args.json {
        let payload = serde_json::json!({
            "input": input,
            "result": result,
            "reference_index": index,
            "contact_link": contact.url(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render_report(args.contingency, &result, &index));
        println!();
        println!("Chatear por WhatsApp: {}", contact.url());
        println!("{}", DISCLAIMER);
    }

    Ok(())
}
