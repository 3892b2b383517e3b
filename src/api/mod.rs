mod error;
pub mod format;
pub mod report;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::{
    AnnualEntry, Duration, DurationUnit, MonthlyEntry, ProjectionInput, ProjectionResult, Rate,
    RateUnit, project, validate,
};

pub use error::{ApiError, ApiResult};
use format::{parse_amount, round_cents};
use report::{LedgerView, render_report};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRateUnit {
    Monthly,
    Annual,
}

impl From<CliRateUnit> for RateUnit {
    fn from(value: CliRateUnit) -> Self {
        match value {
            CliRateUnit::Monthly => RateUnit::Monthly,
            CliRateUnit::Annual => RateUnit::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliDurationUnit {
    Months,
    Years,
}

impl From<CliDurationUnit> for DurationUnit {
    fn from(value: CliDurationUnit) -> Self {
        match value {
            CliDurationUnit::Months => DurationUnit::Months,
            CliDurationUnit::Years => DurationUnit::Years,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRateUnit {
    #[serde(alias = "mensal")]
    Monthly,
    #[serde(alias = "anual", alias = "yearly")]
    Annual,
}

impl From<ApiRateUnit> for CliRateUnit {
    fn from(value: ApiRateUnit) -> Self {
        match value {
            ApiRateUnit::Monthly => CliRateUnit::Monthly,
            ApiRateUnit::Annual => CliRateUnit::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiDurationUnit {
    #[serde(alias = "meses")]
    Months,
    #[serde(alias = "anos")]
    Years,
}

impl From<ApiDurationUnit> for CliDurationUnit {
    fn from(value: ApiDurationUnit) -> Self {
        match value {
            ApiDurationUnit::Months => CliDurationUnit::Months,
            ApiDurationUnit::Years => CliDurationUnit::Years,
        }
    }
}

/// A JSON number, or a string typed the way a user would (`"1.234,56"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    fn resolve(&self, field: &'static str) -> ApiResult<f64> {
        match self {
            AmountField::Number(value) => Ok(*value),
            AmountField::Text(raw) => parse_amount(field, raw),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_capital: Option<AmountField>,
    monthly_contribution: Option<AmountField>,
    contribution_growth: Option<AmountField>,
    rate: Option<AmountField>,
    rate_unit: Option<ApiRateUnit>,
    duration: Option<u32>,
    duration_unit: Option<ApiDurationUnit>,
    inflation: Option<AmountField>,
}

#[derive(Parser, Debug)]
#[command(
    name = "compound",
    about = "Compound interest projection with monthly contributions, yearly contribution raises and inflation"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one projection and print the ledger
    Project(Cli),
    /// Serve the JSON API
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Cli {
    #[arg(long, value_parser = parse_amount_arg, help = "Starting lump sum, e.g. 1000 or 1.000,00")]
    initial_capital: f64,
    #[arg(long, value_parser = parse_amount_arg, default_value = "0")]
    monthly_contribution: f64,
    #[arg(
        long,
        value_parser = parse_amount_arg,
        default_value = "0",
        help = "Yearly raise of the monthly contribution in percent, first applied in month 13"
    )]
    contribution_growth: f64,
    #[arg(long, value_parser = parse_amount_arg, help = "Interest rate in percent per --rate-unit")]
    rate: f64,
    #[arg(long, value_enum, default_value_t = CliRateUnit::Monthly)]
    rate_unit: CliRateUnit,
    #[arg(long, help = "Horizon length in --duration-unit, at least 1")]
    duration: u32,
    #[arg(long, value_enum, default_value_t = CliDurationUnit::Months)]
    duration_unit: CliDurationUnit,
    #[arg(
        long,
        value_parser = parse_amount_arg,
        default_value = "0",
        help = "Expected annual inflation in percent; 0 skips the real-value figures"
    )]
    inflation: f64,
    #[arg(long, value_enum, default_value_t = LedgerView::Annual)]
    view: LedgerView,
}

/// Clap already names the flag, so only the expected layout is reported.
fn parse_amount_arg(raw: &str) -> Result<f64, String> {
    parse_amount("argument", raw)
        .map_err(|_| "expected an amount like 1000, 1234.56 or 1.234,56".to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    monthly_rate_pct: f64,
    total_months: u32,
    final_value: f64,
    total_contributed: f64,
    total_interest: f64,
    inflation_adjusted_final_value: Option<f64>,
    real_gain: Option<f64>,
    monthly_ledger: Vec<MonthlyEntry>,
    annual_ledger: Vec<AnnualEntry>,
}

fn build_input(cli: &Cli) -> ApiResult<ProjectionInput> {
    let input = ProjectionInput {
        initial_capital: cli.initial_capital,
        monthly_contribution: cli.monthly_contribution,
        annual_contribution_growth_pct: cli.contribution_growth,
        rate: Rate {
            value: cli.rate,
            unit: cli.rate_unit.into(),
        },
        duration: Duration {
            value: cli.duration,
            unit: cli.duration_unit.into(),
        },
        annual_inflation_pct: cli.inflation,
    };
    validate(&input)?;
    Ok(input)
}

/// Runs the `project` subcommand and returns the rendered report.
pub fn run_cli_projection(cli: &Cli) -> ApiResult<String> {
    let input = build_input(cli)?;
    let result = project(&input)?;
    Ok(render_report(&result, cli.view))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "compound HTTP API listening");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> impl IntoResponse {
    with_cache_control("ok")
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn project_get_handler(payload: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => ApiError::InvalidPayload(rejection.body_text()).into_response(),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => ApiError::InvalidPayload(rejection.body_text()).into_response(),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let outcome = input_from_payload(payload).and_then(|input| {
        let result = project(&input)?;
        Ok(build_project_response(&input, &result))
    });
    match outcome {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => err.into_response(),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

#[cfg(test)]
fn input_from_json(json: &str) -> ApiResult<ProjectionInput> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
    input_from_payload(payload)
}

fn input_from_payload(payload: ProjectPayload) -> ApiResult<ProjectionInput> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_capital {
        cli.initial_capital = v.resolve("initialCapital")?;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v.resolve("monthlyContribution")?;
    }
    if let Some(v) = payload.contribution_growth {
        cli.contribution_growth = v.resolve("contributionGrowth")?;
    }
    if let Some(v) = payload.rate {
        cli.rate = v.resolve("rate")?;
    }
    if let Some(v) = payload.rate_unit {
        cli.rate_unit = v.into();
    }
    if let Some(v) = payload.duration {
        cli.duration = v;
    }
    if let Some(v) = payload.duration_unit {
        cli.duration_unit = v.into();
    }
    if let Some(v) = payload.inflation {
        cli.inflation = v.resolve("inflation")?;
    }

    build_input(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_capital: 1_000.0,
        monthly_contribution: 100.0,
        contribution_growth: 0.0,
        rate: 1.0,
        rate_unit: CliRateUnit::Monthly,
        duration: 12,
        duration_unit: CliDurationUnit::Months,
        inflation: 0.0,
        view: LedgerView::Annual,
    }
}

fn build_project_response(input: &ProjectionInput, result: &ProjectionResult) -> ProjectResponse {
    ProjectResponse {
        monthly_rate_pct: input.rate.monthly_fraction() * 100.0,
        total_months: result.monthly_ledger.len() as u32,
        final_value: round_cents(result.final_value),
        total_contributed: round_cents(result.total_contributed),
        total_interest: round_cents(result.total_interest),
        inflation_adjusted_final_value: result.inflation_adjusted_final_value.map(round_cents),
        real_gain: result.real_gain.map(round_cents),
        monthly_ledger: result
            .monthly_ledger
            .iter()
            .map(|entry| MonthlyEntry {
                month: entry.month,
                total_contributed: round_cents(entry.total_contributed),
                accrued_interest: round_cents(entry.accrued_interest),
                total_value: round_cents(entry.total_value),
            })
            .collect(),
        annual_ledger: result
            .annual_ledger
            .iter()
            .map(|entry| AnnualEntry {
                year: entry.year,
                total_contributed: round_cents(entry.total_contributed),
                accrued_interest: round_cents(entry.accrued_interest),
                total_value: round_cents(entry.total_value),
            })
            .collect(),
    }
}
