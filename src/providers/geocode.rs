use super::types::*;
use super::{build_http_client, send_json, ProviderError};
use crate::config::Config;
use reqwest::Client;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

pub struct GeocodeClient {
    client: Client,
    config: Config,
}

impl GeocodeClient {
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client()?,
            config,
        })
    }

    /// Forward geocoding. An unknown address yields an empty list, not an error.
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        let url = format!("{}{}", self.config.geocode_base_url, GEOCODE_PATH);
        tracing::debug!("Geocoding address {:?}", address);

        let request = self.client.get(&url).query(&[
            ("address", address),
            ("key", self.config.geocode_api_key.as_str()),
        ]);
        let response: GeocodeResponse = send_json(request).await?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(response.results),
            status => Err(ProviderError::ApiError(format!(
                "geocoder returned {}: {}",
                status,
                response.error_message.unwrap_or_default()
            ))),
        }
    }
}
