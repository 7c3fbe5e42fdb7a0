//! HTTP endpoint for the calculator on AWS Lambda
//!
//! POST a JSON `CalculationRequest`; the response carries the result, the
//! reference index used and the contact link.

use chrono::Local;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::warn;
use serde_json::{json, Value};
use srt_calculator::calculator::CompensationCalculator;
use srt_calculator::claim::CalculationRequest;
use srt_calculator::index::{IndexConfig, ResolvedIndex, RipteClient, DEFAULT_INDEX_URL};
use srt_calculator::parameters::loader::load_or_default;
use srt_calculator::presentation::{ContactLink, DISCLAIMER};
use std::env;
use std::sync::Arc;
use std::time::Duration;

struct AppState {
    calculator: CompensationCalculator,
    index: RipteClient,
}

fn json_response(status: u16, body: &Value) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}

async fn handle(state: &AppState, event: Request) -> Result<Response<Body>, Error> {
    let request: CalculationRequest = match serde_json::from_slice(event.body().as_ref()) {
        Ok(r) => r,
        Err(e) => return json_response(400, &json!({ "error": format!("invalid request body: {}", e) })),
    };

    if let Err(e) = request.validate() {
        return json_response(400, &json!({ "error": e.to_string() }));
    }
    let index = if request.contingency.uses_reference_index() {
        state.index.resolve().await
    } else {
        ResolvedIndex::not_applicable()
    };
    let input = match request.into_input(index.value, Local::now().date_naive()) {
        Ok(input) => input,
        Err(e) => return json_response(400, &json!({ "error": e.to_string() })),
    };

    match state.calculator.compute(&input) {
        Ok(result) => json_response(
            200,
            &json!({
                "result": result,
                "reference_index": index,
                "note": index.fallback_note(),
                "contact_link": ContactLink::default().url(),
                "disclaimer": DISCLAIMER,
            }),
        ),
        Err(e) => {
            warn!("Rejected calculation: {}", e);
            json_response(400, &json!({ "error": e.to_string() }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let params = load_or_default(env::var("SRT_PARAMETERS").ok())?;
    let timeout_secs = env::var("SRT_INDEX_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let state = Arc::new(AppState {
        calculator: CompensationCalculator::new(params),
        index: RipteClient::new(IndexConfig {
            url: env::var("SRT_INDEX_URL").unwrap_or_else(|_| DEFAULT_INDEX_URL.to_string()),
            token: env::var("SRT_INDEX_TOKEN").ok(),
            timeout: Duration::from_secs(timeout_secs),
        }),
    });

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { handle(&state, event).await }
    }))
    .await
}
