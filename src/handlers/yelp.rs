use crate::{error::AppError, models::Business, providers::yelp::YelpClient};

/// Business listings are fetched on every request and never stored.
pub async fn get_businesses(
    yelp_client: &YelpClient,
    search_query: &str,
) -> Result<Vec<Business>, AppError> {
    let businesses = yelp_client.search(search_query).await?;
    Ok(businesses.iter().map(Business::from_yelp).collect())
}
