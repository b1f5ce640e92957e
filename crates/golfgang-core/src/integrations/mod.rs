pub mod open_meteo;

pub use open_meteo::{WeatherClient, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, FORECAST_HORIZON_DAYS};
