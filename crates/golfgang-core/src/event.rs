//! Outing events, RSVPs and members.
//!
//! An [`Event`] is a proposed (or booked) round of golf on a calendar date.
//! Players RSVP with a [`Response`] keyed by user id; the roster is never
//! stored, it is recomputed from the responses on every view.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::preferences::Preferences;
use crate::roster::{RosterAssigner, RosterResult};

/// RSVP status of a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Available,
    Unavailable,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

/// A single player's RSVP to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: RsvpStatus,
    /// Present for available players that filled the form; cleared on "out"
    #[serde(default)]
    pub preferences: Option<Preferences>,
    /// When the player last submitted. Missing for imported or legacy rows.
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}

impl Response {
    /// An "I'm in" response stamped now.
    pub fn available(preferences: Option<Preferences>) -> Self {
        Self {
            status: RsvpStatus::Available,
            preferences,
            responded_at: Some(Utc::now()),
        }
    }

    /// An "I'm out" response stamped now. Preferences are dropped.
    pub fn unavailable() -> Self {
        Self {
            status: RsvpStatus::Unavailable,
            preferences: None,
            responded_at: Some(Utc::now()),
        }
    }
}

/// A registered member of the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// A proposed or booked outing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: NaiveDate,
    /// Stored display title ("Saturday 14th March"); falls back to the date
    pub title: Option<String>,
    /// Tee-off time as "HH:MM" (24h), unset while still being organised
    pub tee_time: Option<String>,
    pub course_name: Option<String>,
    pub course_place_id: Option<String>,
    pub course_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// RSVPs keyed by user id
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
    #[serde(default)]
    pub booked: bool,
    pub booked_at: Option<DateTime<Utc>>,
    pub proposed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_capacity() -> usize {
    RosterAssigner::DEFAULT_CAPACITY
}

impl Event {
    /// Create a new event on `date` with a fresh id and default capacity.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            title: Some(date_title(date)),
            tee_time: None,
            course_name: None,
            course_place_id: None,
            course_address: None,
            latitude: None,
            longitude: None,
            notes: None,
            capacity: RosterAssigner::DEFAULT_CAPACITY,
            responses: BTreeMap::new(),
            booked: false,
            booked_at: None,
            proposed_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_tee_time(mut self, tee_time: impl Into<String>) -> Self {
        self.tee_time = Some(tee_time.into());
        self
    }

    pub fn with_course_name(mut self, name: impl Into<String>) -> Self {
        self.course_name = Some(name.into());
        self
    }

    pub fn with_course_address(mut self, address: impl Into<String>) -> Self {
        self.course_address = Some(address.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_proposer(mut self, user_id: impl Into<String>) -> Self {
        self.proposed_by = Some(user_id.into());
        self
    }

    /// Compute the roster from the current responses.
    ///
    /// Falls back to the default group size when the stored capacity is
    /// zero (old rows), so a view never fails.
    pub fn roster(&self) -> RosterResult {
        let assigner = RosterAssigner::with_capacity(self.capacity)
            .unwrap_or_else(|_| RosterAssigner::new());
        assigner.assign(&self.responses)
    }

    /// Proposer and admins may edit, book or delete.
    pub fn is_editable_by(&self, user_id: &str, is_admin: bool) -> bool {
        is_admin || self.proposed_by.as_deref() == Some(user_id)
    }

    /// An event on `today` still counts as upcoming.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    /// Tee-off as a local datetime. Unset or unparseable tee times fall
    /// back to midnight so calendar export always has a start.
    pub fn tee_datetime(&self) -> NaiveDateTime {
        let time = self
            .tee_time
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
            .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        self.date.and_time(time)
    }

    /// Stored title, or the long date label when none was set.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => self.long_date_label(),
        }
    }

    /// "Saturday, 14 March"
    pub fn long_date_label(&self) -> String {
        self.date.format("%A, %-d %B").to_string()
    }

    /// "Sat, 14 Mar"
    pub fn short_date_label(&self) -> String {
        self.date.format("%a, %-d %b").to_string()
    }
}

/// Default stored title for a date: "Saturday 14th March".
pub fn date_title(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{} {} {}",
        date.format("%A"),
        ordinal_day(date.day()),
        date.format("%B")
    )
}

fn ordinal_day(day: u32) -> String {
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{day}{suffix}")
}
