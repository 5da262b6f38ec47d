use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use std::sync::Arc;

use crate::{
    database::Database,
    error::AppError,
    handlers,
    models::{Business, Forecast, Location},
    providers::{geocode::GeocodeClient, openweather::OpenWeatherClient, yelp::YelpClient},
    query::DataQuery,
};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
    pub geocode_client: Arc<GeocodeClient>,
    pub weather_client: Arc<OpenWeatherClient>,
    pub yelp_client: Arc<YelpClient>,
}

// Request/Response types
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub latitude: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub longitude: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct YelpQuery {
    pub search_query: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.database.health_check().await?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

pub async fn location(
    State(state): State<AppState>,
    DataQuery(query): DataQuery<String>,
) -> Result<Json<Location>, AppError> {
    let location = handlers::get_location(&state.database, &state.geocode_client, &query).await?;
    Ok(Json(location))
}

pub async fn weather(
    State(state): State<AppState>,
    DataQuery(query): DataQuery<WeatherQuery>,
) -> Result<Json<Vec<Forecast>>, AppError> {
    let forecasts = handlers::get_forecasts(
        &state.database,
        &state.weather_client,
        query.latitude,
        query.longitude,
        query.id,
    )
    .await?;
    Ok(Json(forecasts))
}

pub async fn yelp(
    State(state): State<AppState>,
    DataQuery(query): DataQuery<YelpQuery>,
) -> Result<Json<Vec<Business>>, AppError> {
    let businesses = handlers::get_businesses(&state.yelp_client, &query.search_query).await?;
    Ok(Json(businesses))
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/location", get(location))
        .route("/weather", get(weather))
        .route("/yelp", get(yelp))
        .with_state(state)
}
