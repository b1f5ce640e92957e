//! Playing conditions commands.
//!
//! Fetches the Open-Meteo forecast for a date and prints the playability
//! score alongside the raw observation.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use golfgang_core::integrations::WeatherClient;
use golfgang_core::storage::database::EventStore;
use golfgang_core::{ConditionsScorer, Config, WeatherObservation};

#[derive(Subcommand)]
pub enum ConditionsAction {
    /// Forecast and score for an event's date and course
    Forecast {
        /// Event ID
        event: String,
    },
    /// Forecast and score for an arbitrary date and place
    For {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Latitude (default: weather.latitude from config)
        #[arg(long)]
        lat: Option<f64>,
        /// Longitude (default: weather.longitude from config)
        #[arg(long)]
        lng: Option<f64>,
    },
}

pub fn run(action: ConditionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let today = Local::now().date_naive();

    let (date, latitude, longitude) = match action {
        ConditionsAction::Forecast { event } => {
            let store = EventStore::open()?;
            let found = store
                .get_event(&event)?
                .ok_or(format!("Event not found: {event}"))?;
            (found.date, found.latitude, found.longitude)
        }
        ConditionsAction::For { date, lat, lng } => (date, lat, lng),
    };

    let latitude = latitude.unwrap_or(config.weather.latitude);
    let longitude = longitude.unwrap_or(config.weather.longitude);

    let client = WeatherClient::with_base_url(config.weather.base_url.as_str());
    let runtime = tokio::runtime::Runtime::new()?;
    let observation =
        runtime.block_on(client.daily_forecast(date, Some(latitude), Some(longitude), today))?;

    match observation {
        Some(observation) => {
            println!("{}", serde_json::to_string_pretty(&view(&observation))?);
        }
        None => println!("No forecast for {date}: outside the 16-day horizon or no data"),
    }
    Ok(())
}

/// JSON view of an observation with its score and display fields.
pub(crate) fn view(observation: &WeatherObservation) -> serde_json::Value {
    let score = ConditionsScorer::score(observation);
    let condition = observation.condition();
    serde_json::json!({
        "observation": observation,
        "temperature_mean": observation.temperature_mean(),
        "condition": condition.label(),
        "emoji": condition.emoji(),
        "score": score.value,
        "label": score.label.as_str(),
        "color": score.color_hex(),
    })
}
