use crate::{
    database::Database,
    error::AppError,
    models::{Forecast, NewForecast},
    providers::openweather::OpenWeatherClient,
};

/// Returns the cached forecast days for `location_id`, fetching and caching
/// them on a miss. The same id keys both the lookup and the insert.
pub async fn get_forecasts(
    database: &Database,
    weather_client: &OpenWeatherClient,
    latitude: f64,
    longitude: f64,
    location_id: i64,
) -> Result<Vec<Forecast>, AppError> {
    let cached = database.find_forecasts(location_id).await?;
    if !cached.is_empty() {
        tracing::debug!(
            "Forecast cache hit for location {} ({} days)",
            location_id,
            cached.len()
        );
        return Ok(cached);
    }

    tracing::info!(
        "Forecast cache miss for location {}, fetching {}, {}",
        location_id,
        latitude,
        longitude
    );
    let response = weather_client.get_daily(latitude, longitude).await?;

    let days = response
        .daily
        .iter()
        .map(|day| NewForecast::from_daily(day, response.timezone_offset))
        .collect::<Result<Vec<_>, _>>()?;

    let stored = database.insert_forecasts(location_id, &days).await?;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::test_database;
    use crate::providers::types::{GeocodeGeometry, GeocodeResult, LatLng};
    use crate::models::{Location, NewLocation};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn seed_location(db: &Database) -> Location {
        let result = GeocodeResult {
            formatted_address: "Seattle, WA, USA".to_string(),
            geometry: GeocodeGeometry {
                location: LatLng {
                    lat: 47.6062095,
                    lng: -122.3320708,
                },
            },
        };
        let location = NewLocation::from_geocode("seattle", &result).unwrap();
        db.insert_location(&location).await.unwrap()
    }

    fn daily_body() -> serde_json::Value {
        json!({
            "lat": 47.6062,
            "lon": -122.3321,
            "timezone_offset": -25200,
            "daily": [
                { "dt": 1760961600, "summary": "Rain throughout the day" },
                { "dt": 1761048000, "summary": "Cloudy in the morning" },
                { "dt": 1761134400, "summary": "Clear skies" }
            ]
        })
    }

    #[tokio::test]
    async fn test_miss_inserts_one_row_per_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_body()))
            .expect(1)
            .mount(&server)
            .await;

        let db = test_database().await;
        let location = seed_location(&db).await;
        let client = OpenWeatherClient::new(Config::for_tests(&server.uri())).unwrap();

        let forecasts = get_forecasts(&db, &client, location.latitude, location.longitude, location.id)
            .await
            .unwrap();

        assert_eq!(forecasts.len(), 3);
        assert_eq!(db.count_rows("weathers").await, 3);
        assert_eq!(forecasts[0].forecast, "Rain throughout the day");
        assert_eq!(forecasts[0].time, "Mon Oct 20 2025");
        assert!(forecasts.iter().all(|f| f.location_id == location.id));
    }

    #[tokio::test]
    async fn test_hit_skips_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_body()))
            .expect(1)
            .mount(&server)
            .await;

        let db = test_database().await;
        let location = seed_location(&db).await;
        let client = OpenWeatherClient::new(Config::for_tests(&server.uri())).unwrap();

        let first = get_forecasts(&db, &client, location.latitude, location.longitude, location.id)
            .await
            .unwrap();
        let second = get_forecasts(&db, &client, location.latitude, location.longitude, location.id)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(db.count_rows("weathers").await, 3);
    }

    #[tokio::test]
    async fn test_provider_failure_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let db = test_database().await;
        let location = seed_location(&db).await;
        let client = OpenWeatherClient::new(Config::for_tests(&server.uri())).unwrap();

        let result =
            get_forecasts(&db, &client, location.latitude, location.longitude, location.id).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
        assert_eq!(db.count_rows("weathers").await, 0);
    }
}
