//! SQLite-based event storage.
//!
//! Provides persistent storage for:
//! - Outing events and their RSVPs
//! - Group members and admin flags
//!
//! RSVPs live in their own table keyed by `(event_id, user_id)`, so two
//! players answering at the same moment can never overwrite each other's
//! response. Each submission is a single upsert statement.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StoreError;
use crate::event::{Event, Response, RsvpStatus, User};
use crate::preferences::{FormatPreference, Preferences, TimePreference, TransportPreference};

use super::data_dir;

/// SQLite store for events, RSVPs and users.
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the store at `~/.config/golfgang/golfgang.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("golfgang.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: std::path::PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<(), StoreError> {
        // Cascade from events to responses needs foreign keys on.
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        self.migrate()
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id         TEXT PRIMARY KEY,
                username   TEXT NOT NULL,
                email      TEXT,
                is_admin   INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS events (
                id              TEXT PRIMARY KEY,
                date            TEXT NOT NULL,
                title           TEXT,
                tee_time        TEXT,
                course_name     TEXT,
                course_place_id TEXT,
                course_address  TEXT,
                latitude        REAL,
                longitude       REAL,
                notes           TEXT,
                capacity        INTEGER NOT NULL DEFAULT 4,
                booked          INTEGER NOT NULL DEFAULT 0,
                booked_at       TEXT,
                proposed_by     TEXT,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS responses (
                event_id       TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                user_id        TEXT NOT NULL,
                status         TEXT NOT NULL,
                time_pref      TEXT,
                transport_pref TEXT,
                format_pref    TEXT,
                course_note    TEXT,
                responded_at   TEXT,
                PRIMARY KEY (event_id, user_id)
            );

            CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
            CREATE INDEX IF NOT EXISTS idx_responses_event ON responses(event_id);",
        )?;
        Ok(())
    }

    // ----- events -----

    /// Insert a new event, including any responses it already carries
    /// (a proposal usually arrives with the proposer's own RSVP).
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn create_event(&self, event: &Event) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO events (id, date, title, tee_time, course_name, course_place_id,
                                 course_address, latitude, longitude, notes, capacity,
                                 booked, booked_at, proposed_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                event.id,
                event.date.to_string(),
                event.title,
                event.tee_time,
                event.course_name,
                event.course_place_id,
                event.course_address,
                event.latitude,
                event.longitude,
                event.notes,
                event.capacity as i64,
                event.booked,
                event.booked_at.map(|dt| dt.to_rfc3339()),
                event.proposed_by,
                event.created_at.to_rfc3339(),
            ],
        )?;

        for (user_id, response) in &event.responses {
            self.upsert_response(&event.id, user_id, response)?;
        }
        Ok(())
    }

    /// Fetch one event with its responses.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_event(&self, id: &str) -> Result<Option<Event>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, title, tee_time, course_name, course_place_id, course_address,
                    latitude, longitude, notes, capacity, booked, booked_at, proposed_by, created_at
             FROM events WHERE id = ?1",
        )?;
        let event = stmt.query_row(params![id], row_to_event).optional()?;

        match event {
            Some(mut event) => {
                event.responses = self.load_responses(&event.id)?;
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Events on or after `today`, soonest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_upcoming(&self, today: NaiveDate) -> Result<Vec<Event>, rusqlite::Error> {
        self.query_events(
            "SELECT id, date, title, tee_time, course_name, course_place_id, course_address,
                    latitude, longitude, notes, capacity, booked, booked_at, proposed_by, created_at
             FROM events WHERE date >= ?1 ORDER BY date ASC, created_at ASC",
            params![today.to_string()],
        )
    }

    /// Events before `today`, most recent first, capped at `limit`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_past(&self, today: NaiveDate, limit: usize) -> Result<Vec<Event>, rusqlite::Error> {
        self.query_events(
            "SELECT id, date, title, tee_time, course_name, course_place_id, course_address,
                    latitude, longitude, notes, capacity, booked, booked_at, proposed_by, created_at
             FROM events WHERE date < ?1 ORDER BY date DESC, created_at DESC LIMIT ?2",
            params![today.to_string(), limit as i64],
        )
    }

    /// All events, oldest date first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_events(&self) -> Result<Vec<Event>, rusqlite::Error> {
        self.query_events(
            "SELECT id, date, title, tee_time, course_name, course_place_id, course_address,
                    latitude, longitude, notes, capacity, booked, booked_at, proposed_by, created_at
             FROM events ORDER BY date ASC, created_at ASC",
            params![],
        )
    }

    fn query_events(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Event>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let events = stmt.query_map(params, row_to_event)?;
        let mut result = Vec::new();
        for event in events {
            let mut event = event?;
            event.responses = self.load_responses(&event.id)?;
            result.push(event);
        }
        Ok(result)
    }

    /// Update an event's details. Responses, booking state and the date
    /// are not touched; those have their own operations.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn update_event(&self, event: &Event) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE events
             SET title = ?1, tee_time = ?2, course_name = ?3, course_place_id = ?4,
                 course_address = ?5, latitude = ?6, longitude = ?7, notes = ?8, capacity = ?9
             WHERE id = ?10",
            params![
                event.title,
                event.tee_time,
                event.course_name,
                event.course_place_id,
                event.course_address,
                event.latitude,
                event.longitude,
                event.notes,
                event.capacity as i64,
                event.id,
            ],
        )?;
        Ok(())
    }

    /// Mark an event booked (stamping the time) or unbooked (clearing it).
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn set_booked(&self, id: &str, booked: bool) -> Result<bool, rusqlite::Error> {
        let booked_at = booked.then(|| Utc::now().to_rfc3339());
        let changed = self.conn.execute(
            "UPDATE events SET booked = ?1, booked_at = ?2 WHERE id = ?3",
            params![booked, booked_at, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete an event and, via cascade, its responses.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete_event(&self, id: &str) -> Result<bool, rusqlite::Error> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // ----- responses -----

    /// Write one player's RSVP. A single statement, so simultaneous
    /// submissions by different players both land and a resubmission
    /// replaces only that player's row.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn upsert_response(
        &self,
        event_id: &str,
        user_id: &str,
        response: &Response,
    ) -> Result<(), rusqlite::Error> {
        let prefs = response.preferences.as_ref();
        self.conn.execute(
            "INSERT INTO responses (event_id, user_id, status, time_pref, transport_pref,
                                    format_pref, course_note, responded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(event_id, user_id) DO UPDATE SET
                 status = excluded.status,
                 time_pref = excluded.time_pref,
                 transport_pref = excluded.transport_pref,
                 format_pref = excluded.format_pref,
                 course_note = excluded.course_note,
                 responded_at = excluded.responded_at",
            params![
                event_id,
                user_id,
                response.status.as_str(),
                prefs.and_then(|p| p.time).map(|p| p.as_str()),
                prefs.and_then(|p| p.transport).map(|p| p.as_str()),
                prefs.and_then(|p| p.format).map(|p| p.as_str()),
                prefs.and_then(|p| p.course_note.as_deref()),
                response.responded_at.map(|dt| dt.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Remove one player's RSVP (withdrawal, or an admin removal).
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn delete_response(&self, event_id: &str, user_id: &str) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "DELETE FROM responses WHERE event_id = ?1 AND user_id = ?2",
            params![event_id, user_id],
        )?;
        Ok(changed > 0)
    }

    fn load_responses(&self, event_id: &str) -> Result<BTreeMap<String, Response>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, status, time_pref, transport_pref, format_pref, course_note,
                    responded_at
             FROM responses WHERE event_id = ?1",
        )?;
        let rows = stmt.query_map(params![event_id], row_to_response)?;

        let mut responses = BTreeMap::new();
        for row in rows {
            let (user_id, response) = row?;
            responses.insert(user_id, response);
        }
        Ok(responses)
    }

    // ----- users -----

    /// Insert a new member.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including on duplicate ids.
    pub fn create_user(&self, user: &User) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO users (id, username, email, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.username,
                user.email,
                user.is_admin,
                user.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch one member.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get_user(&self, id: &str) -> Result<Option<User>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email, is_admin, created_at FROM users WHERE id = ?1")?;
        stmt.query_row(params![id], row_to_user).optional()
    }

    /// All members, by username.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_users(&self) -> Result<Vec<User>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email, is_admin, created_at FROM users ORDER BY username")?;
        let users = stmt.query_map([], row_to_user)?;
        users.collect()
    }

    /// Grant or revoke the admin flag.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub fn set_admin(&self, id: &str, is_admin: bool) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "UPDATE users SET is_admin = ?1 WHERE id = ?2",
            params![is_admin, id],
        )?;
        Ok(changed > 0)
    }
}

fn row_to_event(row: &rusqlite::Row) -> Result<Event, rusqlite::Error> {
    let date_str: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let capacity: i64 = row.get(10)?;
    let booked_at: Option<String> = row.get(12)?;
    let created_at_str: String = row.get(14)?;
    let created_at = parse_utc(&created_at_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            14,
            rusqlite::types::Type::Text,
            "invalid timestamp".into(),
        )
    })?;

    Ok(Event {
        id: row.get(0)?,
        date,
        title: row.get(2)?,
        tee_time: row.get(3)?,
        course_name: row.get(4)?,
        course_place_id: row.get(5)?,
        course_address: row.get(6)?,
        latitude: row.get(7)?,
        longitude: row.get(8)?,
        notes: row.get(9)?,
        capacity: capacity as usize,
        responses: BTreeMap::new(),
        booked: row.get(11)?,
        booked_at: booked_at.as_deref().and_then(parse_utc),
        proposed_by: row.get(13)?,
        created_at,
    })
}

fn row_to_response(row: &rusqlite::Row) -> Result<(String, Response), rusqlite::Error> {
    let user_id: String = row.get(0)?;
    let status_str: String = row.get(1)?;
    let time_pref: Option<String> = row.get(2)?;
    let transport_pref: Option<String> = row.get(3)?;
    let format_pref: Option<String> = row.get(4)?;
    let course_note: Option<String> = row.get(5)?;
    let responded_at: Option<String> = row.get(6)?;

    let preferences = Preferences {
        time: time_pref.as_deref().and_then(TimePreference::parse),
        transport: transport_pref.as_deref().and_then(TransportPreference::parse),
        format: format_pref.as_deref().and_then(FormatPreference::parse),
        course_note,
    };

    let response = Response {
        status: parse_status(&status_str),
        preferences: if preferences.is_empty() {
            None
        } else {
            Some(preferences)
        },
        responded_at: responded_at.as_deref().and_then(parse_utc),
    };
    Ok((user_id, response))
}

fn row_to_user(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
    let created_at_str: String = row.get(4)?;
    let created_at = parse_utc(&created_at_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            "invalid timestamp".into(),
        )
    })?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        is_admin: row.get(3)?,
        created_at,
    })
}

/// Parse a stored status; unknown strings read as unavailable.
fn parse_status(s: &str) -> RsvpStatus {
    RsvpStatus::parse(s).unwrap_or(RsvpStatus::Unavailable)
}

fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
