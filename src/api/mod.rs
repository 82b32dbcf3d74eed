use std::ffi::OsString;
use std::net::SocketAddr;

use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::core::{
    Catalog, Goal, GrowthPoint, Insight, MarketRates, build_growth_curve, effective_rate,
    evaluate_goal, evaluate_goals, months_between,
};

const MAX_BATCH_GOALS: usize = 256;

#[derive(Parser, Debug)]
#[command(
    name = "goalplan",
    about = "Goal planner: projects a savings goal across investment categories and recommends one"
)]
struct Cli {
    #[arg(long, default_value = "Goal")]
    name: String,
    #[arg(long, help = "Start date (YYYY-MM-DD), defaults to today")]
    start_date: Option<NaiveDate>,
    #[arg(long, help = "Target date (YYYY-MM-DD)")]
    target_date: NaiveDate,
    #[arg(long, help = "Cost of the goal in today's money")]
    amount_needed_today: f64,
    #[arg(long, default_value_t = 6.0, help = "Annual inflation rate in percent")]
    inflation_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Savings already set aside for the goal")]
    current_corpus: f64,
    #[arg(long, default_value_t = 0.0, help = "Planned monthly contribution")]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual increase of the monthly contribution in percent"
    )]
    step_up_rate: f64,
    #[arg(
        long = "market-rate",
        value_parser = parse_market_rate,
        help = "Observed annual return for a category, as <category-id>=<percent>; repeatable"
    )]
    market_rates: Vec<(String, f64)>,
    #[arg(
        long,
        help = "Print the year-by-year growth curve for this category instead of the insight"
    )]
    growth_curve: Option<String>,
}

fn parse_market_rate(raw: &str) -> Result<(String, f64), String> {
    let (id, rate) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <category-id>=<percent>, got `{raw}`"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err("category id must not be empty".to_string());
    }
    let rate = rate
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid rate for {id}: {e}"))?;
    if !rate.is_finite() || rate <= -100.0 {
        return Err(format!("rate for {id} must be > -100"));
    }
    Ok((id.to_string(), rate))
}

#[derive(Debug)]
struct CliRequest {
    goal: Goal,
    market_rates: MarketRates,
    growth_curve: Option<String>,
}

fn build_request(cli: Cli) -> Result<CliRequest, String> {
    let start_date = cli
        .start_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let goal = Goal {
        id: "cli".to_string(),
        name: cli.name,
        start_date,
        target_date: cli.target_date,
        amount_needed_today: cli.amount_needed_today,
        inflation_rate_percent: cli.inflation_rate,
        current_corpus: cli.current_corpus,
        monthly_contribution: cli.monthly_contribution,
        step_up_rate_percent: cli.step_up_rate,
    };
    validate_goal(&goal).map_err(|msg| msg.replace("goal.", "--"))?;

    Ok(CliRequest {
        goal,
        market_rates: cli.market_rates.into_iter().collect(),
        growth_curve: cli.growth_curve,
    })
}

pub fn validate_goal(goal: &Goal) -> Result<(), String> {
    if goal.id.trim().is_empty() {
        return Err("goal.id must not be empty".to_string());
    }
    if goal.name.trim().is_empty() {
        return Err("goal.name must not be empty".to_string());
    }
    if goal.target_date < goal.start_date {
        return Err("goal.target-date must not be before start-date".to_string());
    }
    for (name, value) in [
        ("goal.amount-needed-today", goal.amount_needed_today),
        ("goal.current-corpus", goal.current_corpus),
        ("goal.monthly-contribution", goal.monthly_contribution),
        ("goal.step-up-rate", goal.step_up_rate_percent),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }
    if !goal.inflation_rate_percent.is_finite() || goal.inflation_rate_percent <= -100.0 {
        return Err("goal.inflation-rate must be > -100".to_string());
    }
    Ok(())
}

fn validate_market_rates(rates: &MarketRates) -> Result<(), String> {
    for (id, rate) in rates.iter() {
        if !rate.is_finite() || rate <= -100.0 {
            return Err(format!("marketRates.{id} must be > -100"));
        }
    }
    Ok(())
}

pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let request = build_request(Cli::parse_from(args))?;
    let catalog = Catalog::standard();

    let json = match request.growth_curve {
        Some(category_id) => {
            let curve =
                growth_curve_for(&request.goal, &category_id, catalog, &request.market_rates)?;
            serde_json::to_string_pretty(&curve)
        }
        None => {
            let insight = evaluate_goal(&request.goal, catalog, &request.market_rates);
            serde_json::to_string_pretty(&insight)
        }
    };
    json.map_err(|e| format!("failed to encode output: {e}"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluatePayload {
    goal: Goal,
    #[serde(default)]
    market_rates: MarketRates,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchPayload {
    goals: Vec<Goal>,
    #[serde(default)]
    market_rates: MarketRates,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrowthCurvePayload {
    goal: Goal,
    category_id: String,
    #[serde(default)]
    market_rates: MarketRates,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowthCurveResponse {
    category_id: &'static str,
    rate_percent: f64,
    months: u32,
    points: Vec<GrowthPoint>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn growth_curve_for(
    goal: &Goal,
    category_id: &str,
    catalog: &Catalog,
    rates: &MarketRates,
) -> Result<GrowthCurveResponse, String> {
    let category = catalog
        .get(category_id)
        .ok_or_else(|| format!("unknown category `{category_id}`"))?;
    let rate = effective_rate(category, rates);
    let months = months_between(goal.start_date, goal.target_date);
    Ok(GrowthCurveResponse {
        category_id: category.id,
        rate_percent: rate,
        months,
        points: build_growth_curve(
            rate,
            months,
            goal.current_corpus,
            goal.monthly_contribution,
            goal.step_up_rate_percent,
        ),
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/api/categories", get(categories_handler))
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/evaluate-batch", post(evaluate_batch_handler))
        .route("/api/growth-curve", post(growth_curve_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "goal planner API listening");

    axum::serve(listener, router()).await
}

async fn categories_handler() -> Response {
    json_response(StatusCode::OK, Catalog::standard().categories())
}

fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
}

async fn evaluate_handler(payload: Result<Json<EvaluatePayload>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(msg) =
        validate_goal(&payload.goal).and_then(|()| validate_market_rates(&payload.market_rates))
    {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }
    let insight = evaluate_goal(&payload.goal, Catalog::standard(), &payload.market_rates);
    json_response(StatusCode::OK, insight)
}

async fn evaluate_batch_handler(payload: Result<Json<BatchPayload>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(msg) = validate_market_rates(&payload.market_rates) {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }
    if payload.goals.len() > MAX_BATCH_GOALS {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("at most {MAX_BATCH_GOALS} goals per request"),
        );
    }
    for (idx, goal) in payload.goals.iter().enumerate() {
        if let Err(msg) = validate_goal(goal) {
            return error_response(StatusCode::BAD_REQUEST, &format!("goals[{idx}]: {msg}"));
        }
    }
    let insights: Vec<Insight> =
        evaluate_goals(&payload.goals, Catalog::standard(), &payload.market_rates);
    json_response(StatusCode::OK, insights)
}

async fn growth_curve_handler(
    payload: Result<Json<GrowthCurvePayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(msg) =
        validate_goal(&payload.goal).and_then(|()| validate_market_rates(&payload.market_rates))
    {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }
    match growth_curve_for(
        &payload.goal,
        &payload.category_id,
        Catalog::standard(),
        &payload.market_rates,
    ) {
        Ok(curve) => json_response(StatusCode::OK, curve),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
