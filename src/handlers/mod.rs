//! Cache-or-fetch pipelines behind each route. Handlers receive their
//! storage and provider handles explicitly and never touch globals.

pub mod location;
pub mod weather;
pub mod yelp;

pub use location::get_location;
pub use weather::get_forecasts;
pub use yelp::get_businesses;
