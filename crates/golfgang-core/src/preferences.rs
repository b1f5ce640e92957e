//! Player preference types and the per-event preference summary.
//!
//! Preferences ride along with an RSVP and are aggregated over the
//! confirmed roster only. Unset fields contribute to no count.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::event::Response;

/// Preferred tee-off half of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Am,
    Pm,
    Any,
}

impl TimePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
            Self::Any => "any",
        }
    }

    /// Display form matching the RSVP buttons ("AM", "PM", "Any")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Any => "Any",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "am" => Some(Self::Am),
            "pm" => Some(Self::Pm),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Walk the course or take a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportPreference {
    Walk,
    Cart,
    Any,
}

impl TransportPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Cart => "cart",
            Self::Any => "any",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Cart => "Cart",
            Self::Any => "Any",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "walk" => Some(Self::Walk),
            "cart" => Some(Self::Cart),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Game format for the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    Stroke,
    Scramble,
    Any,
}

impl FormatPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stroke => "stroke",
            Self::Scramble => "scramble",
            Self::Any => "any",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stroke => "Stroke",
            Self::Scramble => "Scramble",
            Self::Any => "Any",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stroke" => Some(Self::Stroke),
            "scramble" => Some(Self::Scramble),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Preferences attached to a single RSVP. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub time: Option<TimePreference>,
    #[serde(default)]
    pub transport: Option<TransportPreference>,
    #[serde(default)]
    pub format: Option<FormatPreference>,
    /// Free-text course wish ("somewhere with a driving range")
    #[serde(default)]
    pub course_note: Option<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.transport.is_none()
            && self.format.is_none()
            && self.course_note.is_none()
    }
}

/// Aggregated preferences of the confirmed roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceSummary {
    pub time_counts: BTreeMap<TimePreference, u32>,
    pub transport_counts: BTreeMap<TransportPreference, u32>,
    pub format_counts: BTreeMap<FormatPreference, u32>,
    /// (user id, note) pairs for confirmed players that left one
    pub course_notes: Vec<(String, String)>,
}

impl PreferenceSummary {
    pub fn is_empty(&self) -> bool {
        self.time_counts.is_empty()
            && self.transport_counts.is_empty()
            && self.format_counts.is_empty()
            && self.course_notes.is_empty()
    }
}

/// Count the set preference fields of the confirmed players.
///
/// Reserve and declined responders are left out: the summary answers
/// "what does the group that is actually playing want".
pub fn summarize(
    confirmed: &[String],
    responses: &BTreeMap<String, Response>,
) -> PreferenceSummary {
    let mut summary = PreferenceSummary::default();
    for user_id in confirmed {
        let Some(prefs) = responses.get(user_id).and_then(|r| r.preferences.as_ref()) else {
            continue;
        };
        if let Some(time) = prefs.time {
            *summary.time_counts.entry(time).or_insert(0) += 1;
        }
        if let Some(transport) = prefs.transport {
            *summary.transport_counts.entry(transport).or_insert(0) += 1;
        }
        if let Some(format) = prefs.format {
            *summary.format_counts.entry(format).or_insert(0) += 1;
        }
        if let Some(note) = prefs.course_note.as_deref() {
            if !note.is_empty() {
                summary.course_notes.push((user_id.clone(), note.to_string()));
            }
        }
    }
    summary
}
