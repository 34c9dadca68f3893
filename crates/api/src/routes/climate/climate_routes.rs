use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;
use std::sync::Arc;

use super::{ApiError, ErrorBody};
use crate::{
    climate_data, AppState, ClimateSession, DateRange, DateSpan, Precipitation,
    TemperatureObservation, TemperatureStats,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every precipitation reading", body = Vec<Precipitation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Precipitation>>, ApiError> {
    let mut session = state.climate_db.session().await?;
    let readings = session.precipitation().await?;
    drop(session);

    Ok(Json(readings))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station id", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorBody)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let mut session = state.climate_db.session().await?;
    let station_ids = session.station_ids().await?;
    drop(session);

    Ok(Json(station_ids))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station over the last 365 days of data", body = Vec<TemperatureObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    let mut session = state.climate_db.session().await?;

    let most_recent = session.most_recent_date().await?;
    let window = DateRange::trailing_year(&most_recent)?;
    let station = session.most_active_station().await?;
    debug!(
        "tobs for {} from {} to {}",
        station, window.start, most_recent
    );
    let observations = session.station_tobs(&station, &window).await?;
    drop(session);

    Ok(Json(observations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD, compared as text"),
    ),
    responses(
        (status = OK, description = "MIN/AVG/MAX temperature from start onwards", body = TemperatureStats),
        (status = NOT_FOUND, description = "Start date outside the stored dates", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorBody)
    ))]
pub async fn start_stats(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let range = DateRange::starting(start);

    let mut session = state.climate_db.session().await?;
    let stats = session.temperature_stats(&range).await?;
    let span = date_span(session.as_mut()).await?;
    drop(session);

    span.check_start(&range.start)?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD, compared as text"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD, compared as text"),
    ),
    responses(
        (status = OK, description = "MIN/AVG/MAX temperature between start and end inclusive", body = TemperatureStats),
        (status = NOT_FOUND, description = "Start and/or end date outside the stored dates", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read climate data", body = ErrorBody)
    ))]
pub async fn start_end_stats(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let range = DateRange::between(start, end.clone());

    let mut session = state.climate_db.session().await?;
    let stats = session.temperature_stats(&range).await?;
    let span = date_span(session.as_mut()).await?;
    drop(session);

    span.check_range(&range.start, &end)?;
    Ok(Json(stats))
}

async fn date_span(session: &mut dyn ClimateSession) -> Result<DateSpan, climate_data::Error> {
    let most_recent = session.most_recent_date().await?;
    let earliest = session.earliest_date().await?;
    Ok(DateSpan::new(earliest, most_recent))
}
