use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{PlanInputs, ProjectionError, ProjectionResult, project, validate_inputs};
use crate::report::{
    PlanSummary, ReportError, TableRow, build_table, export::CSV_FILE_NAME, export_months_csv,
    pdf::PDF_FILE_NAME, render_chart_svg, render_pdf, summary::summary_lines,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    starting_capital: Option<f64>,
    #[serde(alias = "monthlyContributionStart")]
    monthly_contribution: Option<f64>,
    accumulation_rate: Option<f64>,
    #[serde(alias = "monthlyTargetIncomeToday")]
    target_income: Option<f64>,
    inflation_rate: Option<f64>,
    retirement_rate: Option<f64>,
    #[serde(alias = "contributionGrowthRate")]
    contribution_growth: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "fire_plan plan",
    about = "Deterministic financial-independence plan: monthly compounding against an inflation-adjusted income target"
)]
struct Cli {
    #[arg(long, default_value_t = 24)]
    current_age: u32,
    #[arg(long, default_value_t = 45)]
    retirement_age: u32,
    #[arg(long, default_value_t = 0.0)]
    starting_capital: f64,
    #[arg(
        long,
        default_value_t = 100_000.0,
        help = "Monthly contribution in the first year"
    )]
    monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 15.0,
        help = "Annual return during accumulation in percent, e.g. 15"
    )]
    accumulation_rate: f64,
    #[arg(
        long,
        default_value_t = 600_000.0,
        help = "Desired monthly income in today's money"
    )]
    target_income: f64,
    #[arg(long, default_value_t = 9.4, help = "Annual inflation in percent")]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 15.0,
        help = "Annual deposit rate after retirement in percent; must be > 0"
    )]
    retirement_rate: f64,
    #[arg(
        long,
        default_value_t = 6.7,
        help = "Yearly growth of the monthly contribution in percent"
    )]
    contribution_growth: f64,
    #[arg(long, help = "Write the month table as CSV to this path")]
    csv_out: Option<PathBuf>,
    #[arg(long, help = "Write the PDF report to this path")]
    pdf_out: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    inputs: PlanInputs,
    summary: PlanSummary,
    result: ProjectionResult,
    table: Vec<TableRow>,
    chart_svg: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: &Cli) -> Result<PlanInputs, ProjectionError> {
    let inputs = PlanInputs {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        starting_capital: cli.starting_capital,
        monthly_contribution_start: cli.monthly_contribution,
        accumulation_rate: cli.accumulation_rate / 100.0,
        monthly_target_income_today: cli.target_income,
        inflation_rate: cli.inflation_rate / 100.0,
        retirement_rate: cli.retirement_rate / 100.0,
        contribution_growth_rate: cli.contribution_growth / 100.0,
    };
    validate_inputs(&inputs)?;
    Ok(inputs)
}

pub fn run_plan_command<I, T>(args: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let inputs = build_inputs(&cli)?;
    let result = project(&inputs)?;
    log::info!(
        "projected {} months, completion {:.2}%",
        result.months.len(),
        result.plan_completion_pct
    );

    for line in summary_lines(&inputs, &result) {
        println!("{line}");
    }

    if let Some(path) = &cli.csv_out {
        let csv = export_months_csv(&result)?;
        write_artifact(path, csv.as_bytes())?;
        println!("CSV written to {}", path.display());
    }
    if let Some(path) = &cli.pdf_out {
        write_artifact(path, &render_pdf(&inputs, &result))?;
        println!("PDF written to {}", path.display());
    }
    Ok(())
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), CommandError> {
    std::fs::write(path, bytes).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router();

    let listener = TcpListener::bind(addr).await?;
    log::info!("plan HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/report.csv", get(csv_handler))
        .route("/api/report.pdf", get(pdf_handler))
        .route("/api/chart.svg", get(chart_handler))
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<PlanPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<PlanPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: PlanPayload) -> Response {
    let (inputs, result) = match run_projection(payload) {
        Ok(run) => run,
        Err(response) => return response,
    };

    let response = ProjectResponse {
        summary: PlanSummary::new(&inputs, &result),
        table: build_table(&result),
        chart_svg: render_chart_svg(&result),
        inputs,
        result,
    };
    json_response(StatusCode::OK, response)
}

async fn csv_handler(Query(payload): Query<PlanPayload>) -> Response {
    let (_, result) = match run_projection(payload) {
        Ok(run) => run,
        Err(response) => return response,
    };
    match export_months_csv(&result) {
        Ok(csv) => download_response("text/csv; charset=utf-8", CSV_FILE_NAME, csv),
        Err(e) => {
            log::error!("CSV export failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

async fn pdf_handler(Query(payload): Query<PlanPayload>) -> Response {
    let (inputs, result) = match run_projection(payload) {
        Ok(run) => run,
        Err(response) => return response,
    };
    download_response(
        "application/pdf",
        PDF_FILE_NAME,
        render_pdf(&inputs, &result),
    )
}

async fn chart_handler(Query(payload): Query<PlanPayload>) -> Response {
    let (_, result) = match run_projection(payload) {
        Ok(run) => run,
        Err(response) => return response,
    };
    with_cache_control((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_chart_svg(&result),
    ))
}

fn run_projection(payload: PlanPayload) -> Result<(PlanInputs, ProjectionResult), Response> {
    let inputs = inputs_from_payload(payload).map_err(|e| {
        log::warn!("rejected plan input: {e}");
        error_response(StatusCode::BAD_REQUEST, &e.to_string())
    })?;
    let result = project(&inputs).map_err(|e| {
        log::warn!("projection failed: {e}");
        error_response(StatusCode::BAD_REQUEST, &e.to_string())
    })?;
    log::debug!(
        "projected {} months for ages {}-{}",
        result.months.len(),
        inputs.current_age,
        inputs.retirement_age
    );
    Ok((inputs, result))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn download_response(content_type: &str, file_name: &str, body: impl IntoResponse) -> Response {
    with_cache_control((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<PlanInputs, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload).map_err(|e| e.to_string())
}

fn inputs_from_payload(payload: PlanPayload) -> Result<PlanInputs, ProjectionError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.starting_capital {
        cli.starting_capital = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.accumulation_rate {
        cli.accumulation_rate = v;
    }
    if let Some(v) = payload.target_income {
        cli.target_income = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.retirement_rate {
        cli.retirement_rate = v;
    }
    if let Some(v) = payload.contribution_growth {
        cli.contribution_growth = v;
    }

    build_inputs(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli::parse_from(["fire_plan"])
}
