use super::types::*;
use super::{build_http_client, send_json, ProviderError};
use crate::config::Config;
use reqwest::Client;

const SEARCH_PATH: &str = "/v3/businesses/search";

pub struct YelpClient {
    client: Client,
    config: Config,
}

impl YelpClient {
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client()?,
            config,
        })
    }

    pub async fn search(&self, location: &str) -> Result<Vec<YelpBusiness>, ProviderError> {
        let url = format!("{}{}", self.config.yelp_base_url, SEARCH_PATH);

        let request = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.yelp_api_key))
            .query(&[("location", location)]);
        let response: BusinessSearchResponse = send_json(request).await?;

        tracing::debug!(
            "Yelp returned {} of {:?} businesses for {:?}",
            response.businesses.len(),
            response.total,
            location
        );
        Ok(response.businesses)
    }
}
