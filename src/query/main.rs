//! Query server for nearest-location lookups.
//!
//! Provides the HTTP API the role dashboards call to annotate uploaded
//! wall photos with the closest known site.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use banyan::catalog::{load_catalog, LocationIndex};
use banyan::models::{Location, NearestMatch};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Nearest-location query server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Location catalog artifact (JSON, TOML, or CSV)
    #[arg(long, default_value = "location.json")]
    locations: PathBuf,
}

/// Application state shared across handlers
struct AppState {
    index: LocationIndex,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Banyan Query Server");

    let locations = load_catalog(&args.locations)
        .with_context(|| format!("Failed to load catalog from {}", args.locations.display()))?;

    if locations.is_empty() {
        warn!("Catalog is empty; every lookup will return no match");
    }

    let state = Arc::new(AppState {
        index: LocationIndex::new(locations),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/nearest", get(nearest_handler))
        .route("/v1/locations", get(locations_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        locations: state.index.len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    locations: usize,
}

/// Nearest catalog entry for a query point
async fn nearest_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestQueryParams>,
) -> Json<NearestResponse> {
    let nearest = state.index.find_nearest(params.point_lat, params.point_lon);
    Json(NearestResponse { nearest })
}

#[derive(Deserialize)]
struct NearestQueryParams {
    /// Query point latitude
    #[serde(rename = "point.lat")]
    point_lat: f64,
    /// Query point longitude
    #[serde(rename = "point.lon")]
    point_lon: f64,
}

#[derive(Serialize)]
struct NearestResponse {
    /// Absent when the catalog is empty or the query is degenerate
    #[serde(skip_serializing_if = "Option::is_none")]
    nearest: Option<NearestMatch>,
}

/// Full catalog listing for the dashboards
async fn locations_handler(State(state): State<Arc<AppState>>) -> Json<LocationsResponse> {
    Json(LocationsResponse {
        count: state.index.len(),
        locations: state.index.locations().to_vec(),
    })
}

#[derive(Serialize)]
struct LocationsResponse {
    count: usize,
    locations: Vec<Location>,
}
