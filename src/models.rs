//! Record shapes served to the front end and the factories that build them
//! from provider payloads.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::providers::types::{GeocodeResult, OneCallDaily, YelpBusiness};

#[derive(Error, Debug, PartialEq)]
pub enum ModelError {
    #[error("Invalid latitude: {0}. Must be between -90 and 90")]
    InvalidLatitude(f64),
    #[error("Invalid longitude: {0}. Must be between -180 and 180")]
    InvalidLongitude(f64),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Invalid timezone offset: {0}")]
    InvalidOffset(i32),
}

/// A stored geocoding result. `search_query` is the cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id: i64,
}

/// A location that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    search_query: String,
    formatted_query: String,
    latitude: f64,
    longitude: f64,
}

impl NewLocation {
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Result<Self, ModelError> {
        let formatted_query = result.formatted_address.trim();
        if formatted_query.is_empty() {
            return Err(ModelError::MissingField("formatted_address"));
        }

        let coords = result.geometry.location;
        validate_coordinates(coords.lat, coords.lng)?;

        Ok(Self {
            search_query: search_query.to_string(),
            formatted_query: formatted_query.to_string(),
            latitude: coords.lat,
            longitude: coords.lng,
        })
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn formatted_query(&self) -> &str {
        &self.formatted_query
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// One stored forecast day for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Forecast {
    pub forecast: String,
    pub time: String,
    pub id: i64,
    pub location_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewForecast {
    forecast: String,
    time: String,
}

impl NewForecast {
    /// `utc_offset_secs` is the forecast location's offset, so `time` names
    /// the local calendar day.
    pub fn from_daily(day: &OneCallDaily, utc_offset_secs: i32) -> Result<Self, ModelError> {
        let forecast = day
            .summary
            .as_deref()
            .or_else(|| day.weather.first().map(|w| w.description.as_str()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ModelError::MissingField("summary"))?;

        Ok(Self {
            forecast: forecast.to_string(),
            time: format_day(day.dt, utc_offset_secs)?,
        })
    }

    pub fn forecast(&self) -> &str {
        &self.forecast
    }

    pub fn time(&self) -> &str {
        &self.time
    }
}

/// A business listing. Never stored.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub image_url: String,
    pub price: Option<String>,
    pub url: String,
}

impl Business {
    pub fn from_yelp(business: &YelpBusiness) -> Self {
        Self {
            name: business.name.clone(),
            image_url: business.image_url.clone(),
            price: business.price.clone().filter(|p| !p.is_empty()),
            url: business.url.clone(),
        }
    }
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ModelError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ModelError::InvalidLatitude(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ModelError::InvalidLongitude(lon));
    }
    Ok(())
}

/// Formats a unix timestamp as e.g. "Mon Oct 20 2025".
pub fn format_day(timestamp: i64, utc_offset_secs: i32) -> Result<String, ModelError> {
    let offset =
        FixedOffset::east_opt(utc_offset_secs).ok_or(ModelError::InvalidOffset(utc_offset_secs))?;
    let dt = DateTime::from_timestamp(timestamp, 0)
        .ok_or(ModelError::InvalidTimestamp(timestamp))?
        .with_timezone(&offset);

    Ok(dt.format("%a %b %d %Y").to_string())
}
