//! Read-only HTTP API over daily precipitation and temperature observations
//! stored in a sqlite database.

mod date_range;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use date_range::*;
pub use db::{
    climate_data, ClimateAccess, ClimateData, ClimateSession, Measurement, Precipitation,
    SqliteSession, Station, TemperatureObservation, TemperatureStats,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
