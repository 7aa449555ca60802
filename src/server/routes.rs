//! HTTP API routes
//!
//! Defines all REST API endpoints for the server. Upstream failures never
//! become HTTP errors here: the handlers return well-typed, possibly-empty
//! payloads and reserve 400 for caller mistakes (unknown species id,
//! out-of-range coordinates).

use crate::coord::Coordinates;
use crate::error::Error;
use crate::server::state::AppState;
use crate::session::{DetailBundle, OccurrenceReport};
use crate::species::{find_species, species_catalog, SpeciesConfig};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Determine static files path
    // Try relative to cwd first, then fallback to the executable's directory
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        match exe_path.parent() {
            Some(exe_dir) if exe_dir.join("static").exists() => {
                exe_dir.join("static").to_string_lossy().to_string()
            }
            _ => "static".to_string(),
        }
    } else {
        "static".to_string()
    };

    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/species", get(species_handler))
        .route("/api/occurrences", get(occurrences_handler))
        .route("/api/detail", get(detail_handler))
        .fallback_service(ServeDir::new(&static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Occurrence(_) => "OCCURRENCE_ERROR",
            Error::Climate(_) => "CLIMATE_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Number of selectable species
    pub species_count: usize,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        species_count: species_catalog().len(),
    })
}

/// Species list response
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeciesResponse {
    pub species: Vec<SpeciesConfig>,
}

/// The fixed species catalog (drives the selector dropdown)
///
/// GET /api/species
async fn species_handler() -> Json<SpeciesResponse> {
    Json(SpeciesResponse {
        species: species_catalog(),
    })
}

/// Occurrence query parameters
#[derive(Debug, Deserialize)]
pub struct OccurrenceParams {
    /// Species catalog id
    pub species: String,
    /// Grid cell size in kilometers; defaults to the configured value
    pub grid_km: Option<f64>,
}

/// Run a species selection cycle and return the clustered markers
///
/// GET /api/occurrences?species=carolina&grid_km=25
async fn occurrences_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OccurrenceParams>,
) -> Result<Json<OccurrenceReport>, ApiError> {
    let species = find_species(&params.species).ok_or_else(|| ApiError {
        error: format!("Unknown species id: {}", params.species),
        code: "UNKNOWN_SPECIES".to_string(),
    })?;

    let grid_km = match params.grid_km {
        Some(grid_km) => grid_km,
        None => state.default_grid_km().await,
    };

    let selection = state.session.select_species(&species).await;
    Ok(Json(selection.report(grid_km)))
}

/// Detail query parameters
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub lat: f64,
    pub lng: f64,
}

/// Assemble the detail bundle for an occurrence site
///
/// GET /api/detail?lat=35.5&lng=-80.0
async fn detail_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> Result<Json<DetailBundle>, ApiError> {
    let center = Coordinates::new(params.lat, params.lng);
    center.validate().map_err(ApiError::from)?;

    let bundle = state.session.open_detail(center).await;
    Ok(Json(bundle))
}
