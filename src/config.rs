use serde::{Deserialize, Serialize};
use std::env;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub geocode_api_key: String,
    pub geocode_base_url: String,
    pub weather_api_key: String,
    pub weather_base_url: String,
    pub weather_onecall_path: String,
    pub yelp_api_key: String,
    pub yelp_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", raw))?,
            Err(_) => 3000,
        };

        Ok(Config {
            port,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./city_explorer.db?mode=rwc".to_string()),
            geocode_api_key: env::var("GEO_API_KEY")
                .map_err(|_| anyhow::anyhow!("GEO_API_KEY not set"))?,
            geocode_base_url: env::var("GEOCODE_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com".to_string()),
            weather_api_key: env::var("WEATHER_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY not set"))?,
            weather_base_url: env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
            weather_onecall_path: env::var("WEATHER_ONECALL_PATH")
                .unwrap_or_else(|_| "/data/3.0/onecall".to_string()),
            yelp_api_key: env::var("YELP_API_KEY")
                .map_err(|_| anyhow::anyhow!("YELP_API_KEY not set"))?,
            yelp_base_url: env::var("YELP_BASE_URL")
                .unwrap_or_else(|_| "https://api.yelp.com".to_string()),
        })
    }

    /// Config pointing every provider at one stub server.
    #[cfg(test)]
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            geocode_api_key: "geo-key".to_string(),
            geocode_base_url: base_url.to_string(),
            weather_api_key: "weather-key".to_string(),
            weather_base_url: base_url.to_string(),
            weather_onecall_path: "/data/3.0/onecall".to_string(),
            yelp_api_key: "yelp-token".to_string(),
            yelp_base_url: base_url.to_string(),
        }
    }
}
