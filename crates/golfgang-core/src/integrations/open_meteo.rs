//! Open-Meteo daily forecast client.
//!
//! Free endpoint, no API key. Forecasts reach at most 16 days out; dates
//! outside that window resolve to `None` rather than an error, so views
//! can simply leave the conditions card off.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::conditions::WeatherObservation;
use crate::error::WeatherError;
use crate::event::Event;

/// Open-Meteo serves daily forecasts up to 16 days ahead.
pub const FORECAST_HORIZON_DAYS: i64 = 16;

/// Sydney, used when a course has no stored coordinates.
pub const DEFAULT_LATITUDE: f64 = -33.87;
pub const DEFAULT_LONGITUDE: f64 = 151.21;

/// Cap on distinct forecast calls per batch.
const BATCH_FETCH_LIMIT: usize = 7;

/// Async client for the Open-Meteo forecast API.
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_url("https://api.open-meteo.com")
    }

    /// Client against a different endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Daily forecast for `date` at the given coordinates.
    ///
    /// Missing coordinates fall back to the defaults. Returns `Ok(None)`
    /// when `date` is in the past or beyond the forecast horizon, or the
    /// provider has no data for the day.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// response body that does not match the expected shape.
    pub async fn daily_forecast(
        &self,
        date: NaiveDate,
        latitude: Option<f64>,
        longitude: Option<f64>,
        today: NaiveDate,
    ) -> Result<Option<WeatherObservation>, WeatherError> {
        let days_ahead = (date - today).num_days();
        if !(0..=FORECAST_HORIZON_DAYS).contains(&days_ahead) {
            return Ok(None);
        }

        let latitude = latitude.unwrap_or(DEFAULT_LATITUDE);
        let longitude = longitude.unwrap_or(DEFAULT_LONGITUDE);
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode,windspeed_10m_max&timezone=auto&start_date={}&end_date={}",
            self.base_url, latitude, longitude, date, date
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WeatherError::Api {
                status: response.status().as_u16(),
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Malformed(e.to_string()))?;

        Ok(body.daily.and_then(DailySeries::into_observation))
    }

    /// Fetch forecasts for a batch of events, one call per distinct date.
    ///
    /// Past dates are skipped and at most seven distinct dates are
    /// fetched. A date that fails or has no data simply stays absent from
    /// the result.
    pub async fn forecast_for_events(
        &self,
        events: &[Event],
        today: NaiveDate,
    ) -> HashMap<NaiveDate, WeatherObservation> {
        // First event per date decides the coordinates.
        let mut coords_by_date: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
        for event in events {
            if event.date < today {
                continue;
            }
            coords_by_date
                .entry(event.date)
                .or_insert((event.latitude, event.longitude));
        }

        let mut cache = HashMap::new();
        for (date, (latitude, longitude)) in coords_by_date.into_iter().take(BATCH_FETCH_LIMIT) {
            match self.daily_forecast(date, latitude, longitude, today).await {
                Ok(Some(observation)) => {
                    cache.insert(date, observation);
                }
                Ok(None) | Err(_) => {}
            }
        }
        cache
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailySeries>,
}

/// One-day slices of the daily arrays. The API may hand back nulls for
/// individual values.
#[derive(Debug, Default, Deserialize)]
struct DailySeries {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<u8>>,
    #[serde(default)]
    windspeed_10m_max: Vec<Option<f64>>,
}

impl DailySeries {
    /// First day of the series. Individual missing values fall back to
    /// zero; a series with no entries at all is treated as no data.
    fn into_observation(self) -> Option<WeatherObservation> {
        let empty = self.temperature_2m_max.is_empty()
            && self.temperature_2m_min.is_empty()
            && self.precipitation_sum.is_empty()
            && self.weathercode.is_empty()
            && self.windspeed_10m_max.is_empty();
        if empty {
            return None;
        }

        Some(WeatherObservation {
            temperature_max: first_or_zero(&self.temperature_2m_max),
            temperature_min: first_or_zero(&self.temperature_2m_min),
            precipitation_total: first_or_zero(&self.precipitation_sum),
            wind_speed_max: first_or_zero(&self.windspeed_10m_max),
            weather_code: self.weathercode.first().copied().flatten().unwrap_or(0),
        })
    }
}

fn first_or_zero(values: &[Option<f64>]) -> f64 {
    values.first().copied().flatten().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn past_date_is_out_of_horizon() {
        let client = WeatherClient::with_base_url("http://127.0.0.1:9");
        let result = client
            .daily_forecast(day(2025, 3, 1), None, None, day(2025, 3, 2))
            .await
            .unwrap();
        assert!(result.is_none(), "yesterday has no forecast");
    }

    #[tokio::test]
    async fn beyond_sixteen_days_is_out_of_horizon() {
        let client = WeatherClient::with_base_url("http://127.0.0.1:9");
        let result = client
            .daily_forecast(day(2025, 3, 18), None, None, day(2025, 3, 1))
            .await
            .unwrap();
        assert!(result.is_none(), "17 days ahead is past the horizon");
    }

    #[test]
    fn series_values_default_to_zero() {
        let series = DailySeries {
            temperature_2m_max: vec![Some(21.5)],
            temperature_2m_min: vec![None],
            precipitation_sum: vec![Some(2.0)],
            weathercode: vec![None],
            windspeed_10m_max: vec![],
        };
        let obs = series.into_observation().unwrap();
        assert_eq!(obs.temperature_max, 21.5);
        assert_eq!(obs.temperature_min, 0.0);
        assert_eq!(obs.precipitation_total, 2.0);
        assert_eq!(obs.weather_code, 0);
        assert_eq!(obs.wind_speed_max, 0.0);
    }

    #[test]
    fn empty_series_is_no_data() {
        assert!(DailySeries::default().into_observation().is_none());
    }
}
