pub mod climate_data;

pub use climate_data::{ClimateAccess, ClimateData, ClimateSession, SqliteSession};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Row of the `measurement` table: one daily reading at one station.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    /// `YYYY-MM-DD`, so lexical order is chronological order
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

/// Row of the `station` table. Only `station` is read by the API routes.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Precipitation {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation amount, null when not recorded
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TemperatureObservation {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Temperature observation, null when not recorded
    pub tobs: Option<f64>,
}

/// Aggregate over `tobs`; every field is null when no rows matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "MIN")]
    pub min: Option<f64>,
    #[serde(rename = "AVG")]
    pub avg: Option<f64>,
    #[serde(rename = "MAX")]
    pub max: Option<f64>,
}
