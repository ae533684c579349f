use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use hr_analytics::analytics::{
    validate_roster, Employee, EmployeeFilter, EmployeeMetrics, WorkforceReport,
};
use hr_analytics::error::AppError;
use hr_analytics::roster::RosterImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

/// Roster payload shared by the analytics endpoints: inline records or a CSV export.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterPayload {
    #[serde(default)]
    pub(crate) employees: Option<Vec<Employee>>,
    #[serde(default)]
    pub(crate) roster_csv: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

impl RosterPayload {
    fn into_employees(self, today: NaiveDate) -> Result<Vec<Employee>, AppError> {
        match (self.employees, self.roster_csv) {
            (Some(mut employees), None) => {
                validate_roster(&employees)?;
                employees.iter_mut().for_each(Employee::fill_missing_bands);
                Ok(employees)
            }
            (None, Some(csv)) => {
                let reader = Cursor::new(csv.into_bytes());
                Ok(RosterImporter::from_reader(reader, today)?)
            }
            (Some(_), Some(_)) => Err(AppError::BadRequest(
                "provide either employees or roster_csv, not both".to_string(),
            )),
            (None, None) => Err(AppError::BadRequest(
                "provide employees or roster_csv".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    #[serde(flatten)]
    pub(crate) roster: RosterPayload,
    #[serde(default)]
    pub(crate) filter: EmployeeFilter,
}

#[derive(Debug, Serialize)]
pub(crate) struct MetricsResponse {
    pub(crate) reference_date: NaiveDate,
    pub(crate) employees: Vec<EmployeeMetrics>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/analytics/report", post(report_endpoint))
        .route("/api/v1/analytics/metrics", post(employee_metrics_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<WorkforceReport>, AppError> {
    let ReportRequest { roster, filter } = payload;
    let today = state.analytics.today(roster.today);
    let employees = roster.into_employees(today)?;

    let calculator = state.analytics.calculator(today);
    let report = WorkforceReport::build(&employees, &filter, &calculator);
    info!(
        roster = employees.len(),
        selected = report.kpis.total_employees,
        insights = report.insights.len(),
        "workforce report served"
    );

    Ok(Json(report))
}

pub(crate) async fn employee_metrics_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RosterPayload>,
) -> Result<Json<MetricsResponse>, AppError> {
    let today = state.analytics.today(payload.today);
    let employees = payload.into_employees(today)?;

    let calculator = state.analytics.calculator(today);
    let metrics = employees
        .iter()
        .map(|employee| calculator.employee_metrics(employee))
        .collect();

    Ok(Json(MetricsResponse {
        reference_date: today,
        employees: metrics,
    }))
}
