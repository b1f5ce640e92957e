mod config;
pub mod database;

pub use config::{Config, IdentityConfig, ShareConfig, WeatherConfig};
pub use database::EventStore;

use std::path::PathBuf;

/// Returns `~/.config/golfgang[-dev]/` based on GOLFGANG_ENV.
///
/// Set GOLFGANG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GOLFGANG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("golfgang-dev")
    } else {
        base_dir.join("golfgang")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
