//! REST API handlers for shift scheduling.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use crate::demo_data::{self, DemoData};
use crate::dto::{ScheduleRequestDto, ScheduleResponseDto};
use crate::scheduler;
use crate::solver::SolverConfig;

/// Application state shared across handlers.
///
/// Solves are stateless; the only shared piece is the solver budget.
pub struct AppState {
    pub solver_config: SolverConfig,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            solver_config: SolverConfig::default_config(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health & Info
        .route("/health", get(health))
        .route("/info", get(info))
        // Demo data
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        // Schedules
        .route("/schedules", post(create_schedule))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health - Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub solver_engine: &'static str,
}

/// GET /info - Application info endpoint.
async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Shift Scheduling",
        version: env!("CARGO_PKG_VERSION"),
        solver_engine: "good_lp/microlp",
    })
}

/// GET /demo-data - List available demo data sets.
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// GET /demo-data/{id} - Get a specific demo roster as a ready-to-post
/// schedule request.
async fn get_demo_data(Path(id): Path<String>) -> Result<Json<ScheduleRequestDto>, StatusCode> {
    match id.parse::<DemoData>() {
        Ok(demo) => {
            let roster = demo_data::generate(demo);
            Ok(Json(ScheduleRequestDto::from(&roster)))
        }
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /schedules - Solve one week synchronously.
///
/// Responds 404 when no feasible schedule exists for the request; the
/// solve blocks for at most the configured time budget.
async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleRequestDto>,
) -> Result<Json<ScheduleResponseDto>, StatusCode> {
    let config = state.solver_config.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        let employees: Vec<_> = request.employees.iter().map(|e| e.to_employee()).collect();
        let shift_types: Vec<_> = request.shifts.iter().map(|s| s.to_shift_type()).collect();
        scheduler::generate_schedule(&employees, &shift_types, request.week, request.year, &config)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match outcome {
        Ok(Some(response)) => Ok(Json(response)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(error = %e, "schedule solve failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
