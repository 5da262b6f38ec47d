use serde::{Deserialize, Serialize};

// Google Geocoding API

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeGeometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// OpenWeather One Call, daily part only

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneCallDailyResponse {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub timezone_offset: i32,
    pub daily: Vec<OneCallDaily>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneCallDaily {
    pub dt: i64,
    pub summary: Option<String>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: Option<String>,
    pub description: String,
}

// Yelp Fusion business search

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSearchResponse {
    #[serde(default)]
    pub businesses: Vec<YelpBusiness>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YelpBusiness {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub price: Option<String>,
    pub url: String,
}
