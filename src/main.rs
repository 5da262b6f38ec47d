use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod database;
mod error;
mod handlers;
mod models;
mod providers;
mod query;
mod routes;

use config::Config;
use database::Database;
use providers::{geocode::GeocodeClient, openweather::OpenWeatherClient, yelp::YelpClient};
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "city_explorer_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = sqlx::SqlitePool::connect(&config.database_url).await?;
    let database = Arc::new(Database::new(pool));
    database.init_tables().await?;

    let state = AppState {
        database,
        geocode_client: Arc::new(GeocodeClient::new(config.clone())?),
        weather_client: Arc::new(OpenWeatherClient::new(config.clone())?),
        yelp_client: Arc::new(YelpClient::new(config.clone())?),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("App is listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
