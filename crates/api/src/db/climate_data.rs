use async_trait::async_trait;
use log::{debug, info, warn};
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use std::time::Duration;

use super::{Measurement, Precipitation, Station, TemperatureObservation, TemperatureStats};
use crate::DateRange;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("No measurements stored")]
    NoMeasurements,
}

/// Source of short-lived read sessions against the observation store.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Acquire a session for the duration of one request.
    /// The session is released back to the store when dropped.
    async fn session(&self) -> Result<Box<dyn ClimateSession>, Error>;
}

/// Read-only queries available within one session.
#[async_trait]
pub trait ClimateSession: Send {
    /// Every `(date, prcp)` pair, in store order
    async fn precipitation(&mut self) -> Result<Vec<Precipitation>, Error>;
    /// Every station id from the station table, in store order
    async fn station_ids(&mut self) -> Result<Vec<String>, Error>;
    /// Latest measurement date
    async fn most_recent_date(&mut self) -> Result<String, Error>;
    /// Earliest measurement date
    async fn earliest_date(&mut self) -> Result<String, Error>;
    /// Station with the most measurement rows. Equal counts resolve to
    /// whichever station sqlite returns first.
    async fn most_active_station(&mut self) -> Result<String, Error>;
    /// `(date, tobs)` pairs for one station, both bounds inclusive
    async fn station_tobs(
        &mut self,
        station_id: &str,
        range: &DateRange,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    /// MIN/AVG/MAX of tobs across all stations, both bounds inclusive,
    /// unbounded above when `range.end` is `None`
    async fn temperature_stats(&mut self, range: &DateRange) -> Result<TemperatureStats, Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Opens a read-only pool over an existing database file; the file is never created.
    pub async fn new(database_path: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("Opened climate database (read-only): {}", database_path);
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check connectivity and that both tables decode into their record types.
    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        let measurement: Option<Measurement> = sqlx::query_as(
            "SELECT id, station, date, prcp, tobs FROM measurement LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        let station: Option<Station> = sqlx::query_as(
            "SELECT id, station, name, latitude, longitude, elevation FROM station LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        if measurement.is_none() {
            warn!("measurement table is empty, date lookups will fail");
        }
        debug!("health check sample: {:?} {:?}", measurement, station);
        Ok(())
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn session(&self) -> Result<Box<dyn ClimateSession>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(SqliteSession { conn }))
    }
}

/// A pooled connection checked out for one request.
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

#[async_trait]
impl ClimateSession for SqliteSession {
    async fn precipitation(&mut self) -> Result<Vec<Precipitation>, Error> {
        let rows = sqlx::query_as::<_, Precipitation>("SELECT date, prcp FROM measurement")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn station_ids(&mut self) -> Result<Vec<String>, Error> {
        let ids = sqlx::query_scalar::<_, String>("SELECT station FROM station")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(ids)
    }

    async fn most_recent_date(&mut self) -> Result<String, Error> {
        sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?
            .ok_or(Error::NoMeasurements)
    }

    async fn earliest_date(&mut self) -> Result<String, Error> {
        sqlx::query_scalar::<_, Option<String>>("SELECT MIN(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?
            .ok_or(Error::NoMeasurements)
    }

    async fn most_active_station(&mut self) -> Result<String, Error> {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT station, COUNT(station) AS row_count
             FROM measurement
             GROUP BY station
             ORDER BY row_count DESC
             LIMIT 1",
        )
        .fetch_optional(&mut *self.conn)
        .await?;

        let (station, row_count) = row.ok_or(Error::NoMeasurements)?;
        debug!("most active station {} with {} rows", station, row_count);
        Ok(station)
    }

    async fn station_tobs(
        &mut self,
        station_id: &str,
        range: &DateRange,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        let rows = match &range.end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureObservation>(
                    "SELECT date, tobs FROM measurement
                     WHERE station = ? AND date >= ? AND date <= ?",
                )
                .bind(station_id)
                .bind(&range.start)
                .bind(end)
                .fetch_all(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureObservation>(
                    "SELECT date, tobs FROM measurement WHERE station = ? AND date >= ?",
                )
                .bind(station_id)
                .bind(&range.start)
                .fetch_all(&mut *self.conn)
                .await?
            }
        };
        Ok(rows)
    }

    async fn temperature_stats(&mut self, range: &DateRange) -> Result<TemperatureStats, Error> {
        let stats = match &range.end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureStats>(
                    "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max
                     FROM measurement WHERE date >= ? AND date <= ?",
                )
                .bind(&range.start)
                .bind(end)
                .fetch_one(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureStats>(
                    "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max
                     FROM measurement WHERE date >= ?",
                )
                .bind(&range.start)
                .fetch_one(&mut *self.conn)
                .await?
            }
        };
        Ok(stats)
    }
}
