//! Deterministic roster assignment.
//!
//! Confirmed spots go to available players in RSVP order. The roster is
//! never stored; it is recomputed from the responses on every view, so
//! every page of the app agrees on who is playing.
//!
//! ## Ordering
//!
//! | Response | Bucket |
//! |----------|--------|
//! | available, within capacity | confirmed |
//! | available, past capacity | reserve |
//! | unavailable | declined |
//!
//! Available players queue by `responded_at` ascending. Players without a
//! timestamp join the back of the queue. Ties keep user-id order, so the
//! same responses always produce the same roster.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::event::{Response, RsvpStatus};

/// Assigns responders to confirmed, reserve and declined buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterAssigner {
    capacity: usize,
}

impl RosterAssigner {
    /// Default group size: one tee slot of four.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Assigner with the default capacity.
    pub fn new() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Assigner with a custom capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ValidationError> {
        if capacity == 0 {
            return Err(ValidationError::InvalidValue {
                field: "capacity".to_string(),
                message: "capacity must be at least 1".to_string(),
            });
        }
        Ok(Self { capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Assign every responder to exactly one bucket.
    ///
    /// The input map is ordered by user id and the sort is stable, so
    /// equal (or missing) timestamps resolve by user id ascending.
    pub fn assign(&self, responses: &BTreeMap<String, Response>) -> RosterResult {
        let mut candidates: Vec<(&str, &Response)> = Vec::new();
        let mut declined: Vec<String> = Vec::new();

        for (user_id, response) in responses {
            match response.status {
                RsvpStatus::Available => candidates.push((user_id, response)),
                RsvpStatus::Unavailable => declined.push(user_id.clone()),
            }
        }

        // Missing timestamps sort after every real one.
        candidates.sort_by_key(|(_, r)| (r.responded_at.is_none(), r.responded_at));

        let mut confirmed: Vec<String> =
            candidates.into_iter().map(|(id, _)| id.to_string()).collect();
        let reserve = confirmed.split_off(confirmed.len().min(self.capacity));

        RosterResult {
            capacity: self.capacity,
            confirmed,
            reserve,
            declined,
        }
    }
}

impl Default for RosterAssigner {
    fn default() -> Self {
        Self::new()
    }
}

/// Roster computed from one event's responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterResult {
    pub capacity: usize,
    /// Playing, in queue order
    pub confirmed: Vec<String>,
    /// Waiting for a spot, in queue order
    pub reserve: Vec<String>,
    /// Responded unavailable
    pub declined: Vec<String>,
}

impl RosterResult {
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Spots still open ("2/4 players" views).
    pub fn open_slots(&self) -> usize {
        self.capacity.saturating_sub(self.confirmed.len())
    }

    pub fn is_full(&self) -> bool {
        self.confirmed.len() >= self.capacity
    }

    pub fn has_reserve(&self) -> bool {
        !self.reserve.is_empty()
    }
}
