use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{Forecast, Location, NewForecast, NewLocation};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_tables(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS locations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                search_query TEXT NOT NULL UNIQUE,
                formatted_query TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weathers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                forecast TEXT NOT NULL,
                time TEXT NOT NULL,
                location_id INTEGER NOT NULL REFERENCES locations(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_weathers_location_id ON weathers(location_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Locations

    pub async fn find_location(&self, search_query: &str) -> Result<Option<Location>, DatabaseError> {
        let result = sqlx::query_as::<_, Location>(
            "SELECT id, search_query, formatted_query, latitude, longitude FROM locations WHERE search_query = $1",
        )
        .bind(search_query)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Inserts the location, or returns the stored row if another request
    /// cached the same `search_query` first.
    pub async fn insert_location(&self, location: &NewLocation) -> Result<Location, DatabaseError> {
        let result = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (search_query, formatted_query, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(search_query) DO UPDATE SET search_query = excluded.search_query
            RETURNING id, search_query, formatted_query, latitude, longitude
            "#,
        )
        .bind(location.search_query())
        .bind(location.formatted_query())
        .bind(location.latitude())
        .bind(location.longitude())
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    // Forecasts

    pub async fn find_forecasts(&self, location_id: i64) -> Result<Vec<Forecast>, DatabaseError> {
        let results = sqlx::query_as::<_, Forecast>(
            "SELECT id, forecast, time, location_id FROM weathers WHERE location_id = $1 ORDER BY id",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// Stores all forecast days for a location, or none of them.
    pub async fn insert_forecasts(
        &self,
        location_id: i64,
        forecasts: &[NewForecast],
    ) -> Result<Vec<Forecast>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(forecasts.len());

        for forecast in forecasts {
            let row = sqlx::query_as::<_, Forecast>(
                r#"
                INSERT INTO weathers (forecast, time, location_id)
                VALUES ($1, $2, $3)
                RETURNING id, forecast, time, location_id
                "#,
            )
            .bind(forecast.forecast())
            .bind(forecast.time())
            .bind(location_id)
            .fetch_one(&mut *tx)
            .await?;
            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    #[cfg(test)]
    pub async fn count_rows(&self, table: &str) -> i64 {
        let sql = match table {
            "locations" => "SELECT COUNT(*) FROM locations",
            "weathers" => "SELECT COUNT(*) FROM weathers",
            other => panic!("unknown table {}", other),
        };
        sqlx::query_scalar(sql).fetch_one(&self.pool).await.unwrap()
    }
}

/// In-memory database with the schema applied. A single connection keeps
/// every query on the same memory store.
#[cfg(test)]
pub async fn test_database() -> Database {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let database = Database::new(pool);
    database.init_tables().await.unwrap();
    database
}
