use crate::{
    database::Database,
    error::AppError,
    models::{Location, NewLocation},
    providers::geocode::GeocodeClient,
};

/// Returns the cached location for `query`, geocoding and caching it on a miss.
pub async fn get_location(
    database: &Database,
    geocoder: &GeocodeClient,
    query: &str,
) -> Result<Location, AppError> {
    if let Some(location) = database.find_location(query).await? {
        tracing::debug!("Location cache hit for {:?} (id {})", query, location.id);
        return Ok(location);
    }

    tracing::info!("Location cache miss for {:?}, geocoding", query);
    let results = geocoder.geocode(query).await?;
    let first = results
        .first()
        .ok_or_else(|| AppError::NoResults(query.to_string()))?;

    let location = NewLocation::from_geocode(query, first)?;
    let stored = database.insert_location(&location).await?;
    tracing::debug!("Cached location {:?} as id {}", query, stored.id);

    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::test_database;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocode_body(address: &str, lat: f64, lng: f64) -> serde_json::Value {
        json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": address,
                    "geometry": { "location": { "lat": lat, "lng": lng } }
                },
                {
                    "formatted_address": "Somewhere Else",
                    "geometry": { "location": { "lat": 0.0, "lng": 0.0 } }
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_miss_stores_exactly_one_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "seattle"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(geocode_body("Seattle, WA, USA", 47.6062095, -122.3320708)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let db = test_database().await;
        let geocoder = GeocodeClient::new(Config::for_tests(&server.uri())).unwrap();

        let location = get_location(&db, &geocoder, "seattle").await.unwrap();

        assert_eq!(db.count_rows("locations").await, 1);
        assert_eq!(location.search_query, "seattle");
        assert_eq!(location.formatted_query, "Seattle, WA, USA");
        assert_eq!(location.latitude, 47.6062095);
        assert_eq!(location.longitude, -122.3320708);
        assert_eq!(db.find_location("seattle").await.unwrap(), Some(location));
    }

    #[tokio::test]
    async fn test_hit_returns_stored_row_without_geocoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(geocode_body("Seattle, WA, USA", 47.6062095, -122.3320708)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let db = test_database().await;
        let geocoder = GeocodeClient::new(Config::for_tests(&server.uri())).unwrap();

        let first = get_location(&db, &geocoder, "seattle").await.unwrap();
        let second = get_location(&db, &geocoder, "seattle").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(db.count_rows("locations").await, 1);
    }

    #[tokio::test]
    async fn test_no_results_is_failure_and_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
            )
            .mount(&server)
            .await;

        let db = test_database().await;
        let geocoder = GeocodeClient::new(Config::for_tests(&server.uri())).unwrap();

        let result = get_location(&db, &geocoder, "qwertyuiop").await;

        assert!(matches!(result, Err(AppError::NoResults(_))));
        assert_eq!(db.count_rows("locations").await, 0);
    }
}
