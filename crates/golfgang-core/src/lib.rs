//! # GolfGang Core Library
//!
//! This library provides the core business logic for GolfGang, a planner for
//! a small golf group's weekend rounds. It implements a CLI-first philosophy
//! where all operations are available via a standalone CLI binary; any future
//! GUI is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Events**: Proposed and booked outings with per-player RSVPs
//! - **Roster**: Deterministic assignment of responders to confirmed and
//!   reserve lists, ordered by response time
//! - **Conditions**: Threshold-based playability scoring of daily forecasts
//! - **Storage**: SQLite-based event storage and TOML-based configuration
//! - **Integrations**: Open-Meteo forecast client
//! - **Calendar**: ICS export, Google Calendar links and share messages
//!
//! ## Key Components
//!
//! - [`RosterAssigner`]: Capacity-based roster assignment
//! - [`ConditionsScorer`]: Forecast-to-playability scoring
//! - [`EventStore`]: Event and RSVP persistence
//! - [`Config`]: Application configuration management

pub mod event;
pub mod roster;
pub mod conditions;
pub mod preferences;
pub mod calendar;
pub mod storage;
pub mod integrations;
pub mod error;

pub use event::{Event, Response, RsvpStatus, User};
pub use roster::{RosterAssigner, RosterResult};
pub use conditions::{
    ConditionPenalties, ConditionsScorer, PlayabilityLabel, PlayabilityScore, SkyCondition,
    WeatherObservation,
};
pub use preferences::{
    FormatPreference, PreferenceSummary, Preferences, TimePreference, TransportPreference,
};
pub use storage::{Config, EventStore};
pub use error::{ConfigError, CoreError, StoreError, ValidationError, WeatherError};
