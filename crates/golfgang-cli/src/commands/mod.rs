//! Command implementations, one module per subcommand.

use golfgang_core::preferences::{FormatPreference, TimePreference, TransportPreference};
use golfgang_core::storage::database::EventStore;
use golfgang_core::{Config, Preferences, User};

pub mod conditions;
pub mod config;
pub mod event;
pub mod roster;
pub mod rsvp;
pub mod user;

/// Resolve the acting user from `--user` or the configured identity.
pub(crate) fn acting_user(
    store: &EventStore,
    flag: Option<String>,
) -> Result<User, Box<dyn std::error::Error>> {
    let id = match flag {
        Some(id) => id,
        None => Config::load_or_default()
            .identity
            .user_id
            .ok_or("no acting user: pass --user or set identity.user_id")?,
    };
    store
        .get_user(&id)?
        .ok_or_else(|| format!("User not found: {id}").into())
}

/// Shareable page URL for an event.
pub(crate) fn event_url(config: &Config, event_id: &str) -> String {
    format!("{}/event/{}", config.share.base_url, event_id)
}

/// Build preferences from the optional flag values.
pub(crate) fn parse_preferences(
    time: Option<String>,
    transport: Option<String>,
    format: Option<String>,
    course_note: Option<String>,
) -> Result<Option<Preferences>, Box<dyn std::error::Error>> {
    let time = match time {
        Some(s) => Some(TimePreference::parse(&s).ok_or(format!("invalid time preference: {s}"))?),
        None => None,
    };
    let transport = match transport {
        Some(s) => Some(
            TransportPreference::parse(&s).ok_or(format!("invalid transport preference: {s}"))?,
        ),
        None => None,
    };
    let format = match format {
        Some(s) => {
            Some(FormatPreference::parse(&s).ok_or(format!("invalid format preference: {s}"))?)
        }
        None => None,
    };

    let preferences = Preferences {
        time,
        transport,
        format,
        course_note,
    };
    if preferences.is_empty() {
        Ok(None)
    } else {
        Ok(Some(preferences))
    }
}
