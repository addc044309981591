//! HTTP front for the prediction service.
//!
//! Exposes autocomplete, place resolution and reverse lookup to the mobile
//! client, restricted to the configured region.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use aquanova_places::config::Config;
use aquanova_places::{Coordinates, GeocodeQueryService, NominatimProvider, NormalizedPrediction};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "places")]
#[command(about = "Address prediction server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// TOML config file (provider, bounds, search)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the provider base URL
    #[arg(long)]
    base_url: Option<String>,
}

type AppState = Arc<GeocodeQueryService<NominatimProvider>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(url) = args.base_url {
        config.provider.base_url = url;
    }

    info!("AquaNova Places");
    info!(
        "Provider {} (lang={}, countries={})",
        config.provider.base_url, config.provider.language, config.provider.country_codes
    );
    info!(
        "Bounds N {} S {} W {} E {}",
        config.bounds.north(),
        config.bounds.south(),
        config.bounds.west(),
        config.bounds.east()
    );

    let provider = NominatimProvider::new(config.provider.clone())?;
    let state: AppState = Arc::new(GeocodeQueryService::new(provider, config.bounds));

    let app = router(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/autocomplete", get(autocomplete_handler))
        .route("/v1/place", get(place_handler))
        .route("/v1/reverse", get(reverse_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Ranked predictions for a partial address. Provider failures show up as
/// an empty list, never as an error status.
async fn autocomplete_handler(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Json<PredictionsResponse> {
    let predictions = state.predict(&params.text).await;
    Json(PredictionsResponse { predictions })
}

/// Coordinates for a selected prediction
async fn place_handler(
    State(state): State<AppState>,
    Query(params): Query<PlaceParams>,
) -> Result<Json<Coordinates>, StatusCode> {
    state
        .resolve_coordinates(&params.id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Address at a point inside the region
async fn reverse_handler(
    State(state): State<AppState>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<NormalizedPrediction>, StatusCode> {
    state
        .reverse_lookup(Coordinates::new(params.point_lat, params.point_lon))
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Deserialize)]
struct AutocompleteParams {
    /// Search text
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct PlaceParams {
    /// Prediction id
    id: String,
}

#[derive(Deserialize)]
struct ReverseParams {
    /// Point latitude
    #[serde(rename = "point.lat")]
    point_lat: f64,
    /// Point longitude
    #[serde(rename = "point.lon")]
    point_lon: f64,
}

#[derive(Serialize)]
struct PredictionsResponse {
    predictions: Vec<NormalizedPrediction>,
}
