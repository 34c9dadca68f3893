use crate::{
    climate_data::ClimateAccess, index_handler, precipitation, routes, start_end_stats,
    start_stats, stations, tobs, ClimateData, ErrorBody, Precipitation, TemperatureObservation,
    TemperatureStats,
};
use anyhow::{anyhow, Context};
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use climate_core::{is_file, path_exists};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::climate_routes::start_stats,
        routes::climate::climate_routes::start_end_stats,
    ),
    components(
        schemas(
                Precipitation,
                TemperatureObservation,
                TemperatureStats,
                ErrorBody
            )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over daily precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    database_path: String,
    max_connections: u32,
) -> Result<AppState, anyhow::Error> {
    if !path_exists(&database_path) {
        return Err(anyhow!("climate database not found at {}", database_path));
    }
    if !is_file(&database_path) {
        return Err(anyhow!("climate database {} is not a file", database_path));
    }

    let climate_db = ClimateAccess::new(&database_path, max_connections)
        .await
        .with_context(|| format!("error opening climate database {}", database_path))?;
    climate_db
        .health_check()
        .await
        .with_context(|| format!("climate database {} failed health check", database_path))?;

    Ok(AppState {
        climate_db: Arc::new(climate_db),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(start_stats))
        .route("/api/v1.0/{start}/{end}", get(start_end_stats))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
