use super::types::*;
use super::{build_http_client, send_json, ProviderError};
use crate::config::Config;
use reqwest::Client;

pub struct OpenWeatherClient {
    client: Client,
    config: Config,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client()?,
            config,
        })
    }

    /// Daily forecast entries for a coordinate pair.
    pub async fn get_daily(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<OneCallDailyResponse, ProviderError> {
        if !self.is_valid_coordinates(lat, lon) {
            return Err(ProviderError::InvalidCoordinates(lat, lon));
        }

        let url = format!(
            "{}{}",
            self.config.weather_base_url, self.config.weather_onecall_path
        );

        let request = self.client.get(&url).query(&[
            ("lat", lat.to_string().as_str()),
            ("lon", lon.to_string().as_str()),
            ("units", "metric"),
            ("exclude", "current,minutely,hourly,alerts"),
            ("appid", self.config.weather_api_key.as_str()),
        ]);

        send_json(request).await
    }

    fn is_valid_coordinates(&self, lat: f64, lon: f64) -> bool {
        (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    }
}
