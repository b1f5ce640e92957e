//! Event management commands.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use golfgang_core::calendar;
use golfgang_core::integrations::WeatherClient;
use golfgang_core::storage::database::EventStore;
use golfgang_core::{Config, Event, Response, RosterAssigner, WeatherObservation};

use super::{acting_user, event_url, parse_preferences};

#[derive(Subcommand)]
pub enum EventAction {
    /// Propose a new round
    Propose {
        /// Event date (YYYY-MM-DD)
        date: NaiveDate,
        /// Override the generated title
        #[arg(long)]
        title: Option<String>,
        /// Tee time (HH:MM, 24h)
        #[arg(long)]
        tee: Option<String>,
        /// Course name
        #[arg(long)]
        course: Option<String>,
        /// Course street address
        #[arg(long)]
        address: Option<String>,
        /// Course latitude
        #[arg(long)]
        lat: Option<f64>,
        /// Course longitude
        #[arg(long)]
        lng: Option<f64>,
        /// Notes for the group
        #[arg(long)]
        notes: Option<String>,
        /// Player capacity (default: 4)
        #[arg(long)]
        capacity: Option<usize>,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
        /// Preferred time of day: am, pm or any
        #[arg(long)]
        time: Option<String>,
        /// Walk or ride: walk, cart or any
        #[arg(long)]
        transport: Option<String>,
        /// Playing format: stroke, scramble or any
        #[arg(long)]
        format: Option<String>,
        /// Course wish to file with the RSVP
        #[arg(long)]
        course_note: Option<String>,
    },
    /// List events
    List {
        /// Show recent past events instead of upcoming ones
        #[arg(long)]
        past: bool,
    },
    /// Show one event with roster, preferences and conditions
    Show {
        /// Event ID
        id: String,
    },
    /// Edit event details
    Edit {
        /// Event ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New tee time (HH:MM, 24h)
        #[arg(long)]
        tee: Option<String>,
        /// New course name
        #[arg(long)]
        course: Option<String>,
        /// New course place id
        #[arg(long)]
        place_id: Option<String>,
        /// New course street address
        #[arg(long)]
        address: Option<String>,
        /// New course latitude
        #[arg(long)]
        lat: Option<f64>,
        /// New course longitude
        #[arg(long)]
        lng: Option<f64>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// New player capacity
        #[arg(long)]
        capacity: Option<usize>,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Mark an event booked
    Book {
        /// Event ID
        id: String,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Clear the booked flag
    Unbook {
        /// Event ID
        id: String,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete an event and its RSVPs
    Delete {
        /// Event ID
        id: String,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Write an .ics calendar file for an event
    Ics {
        /// Event ID
        id: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the share message for an event
    Share {
        /// Event ID
        id: String,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = EventStore::open()?;

    match action {
        EventAction::Propose {
            date,
            title,
            tee,
            course,
            address,
            lat,
            lng,
            notes,
            capacity,
            user,
            time,
            transport,
            format,
            course_note,
        } => {
            let proposer = acting_user(&store, user)?;

            let mut event = Event::new(date).with_proposer(proposer.id.as_str());
            if let Some(t) = title {
                event = event.with_title(t);
            }
            if let Some(t) = tee {
                event = event.with_tee_time(t);
            }
            if let Some(c) = course {
                event = event.with_course_name(c);
            }
            if let Some(a) = address {
                event = event.with_course_address(a);
            }
            if let (Some(lat), Some(lng)) = (lat, lng) {
                event = event.with_coordinates(lat, lng);
            }
            if let Some(n) = notes {
                event = event.with_notes(n);
            }
            if let Some(c) = capacity {
                RosterAssigner::with_capacity(c)?;
                event = event.with_capacity(c);
            }

            // Proposing counts as the proposer's own "in" RSVP
            let preferences = parse_preferences(time, transport, format, course_note)?;
            event
                .responses
                .insert(proposer.id.clone(), Response::available(preferences));

            store.create_event(&event)?;
            println!("Event proposed: {}", event.id);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::List { past } => {
            let today = Local::now().date_naive();
            let events = if past {
                store.list_past(today, 5)?
            } else {
                store.list_upcoming(today)?
            };
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::Show { id } => {
            let event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            let config = Config::load_or_default();
            let roster = event.roster();
            let summary =
                golfgang_core::preferences::summarize(&roster.confirmed, &event.responses);
            let names = serde_json::json!({
                "confirmed": resolve_names(&store, &roster.confirmed)?,
                "reserve": resolve_names(&store, &roster.reserve)?,
                "declined": resolve_names(&store, &roster.declined)?,
            });

            let today = Local::now().date_naive();
            let conditions = fetch_forecast(&config, &event, today)
                .map(|observation| super::conditions::view(&observation));

            let view = serde_json::json!({
                "event": event,
                "url": event_url(&config, &event.id),
                "roster": roster,
                "names": names,
                "preferences": summary,
                "conditions": conditions,
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        EventAction::Edit {
            id,
            title,
            tee,
            course,
            place_id,
            address,
            lat,
            lng,
            notes,
            capacity,
            user,
        } => {
            let actor = acting_user(&store, user)?;
            let mut event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            if !event.is_editable_by(&actor.id, actor.is_admin) {
                return Err("only the proposer or an admin can edit this event".into());
            }

            if let Some(t) = title {
                event.title = Some(t);
            }
            if let Some(t) = tee {
                event.tee_time = Some(t);
            }
            if let Some(c) = course {
                event.course_name = Some(c);
            }
            if let Some(p) = place_id {
                event.course_place_id = Some(p);
            }
            if let Some(a) = address {
                event.course_address = Some(a);
            }
            if let Some(v) = lat {
                event.latitude = Some(v);
            }
            if let Some(v) = lng {
                event.longitude = Some(v);
            }
            if let Some(n) = notes {
                event.notes = Some(n);
            }
            if let Some(c) = capacity {
                RosterAssigner::with_capacity(c)?;
                event.capacity = c;
            }

            store.update_event(&event)?;
            println!("Event updated:");
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::Book { id, user } => {
            let actor = acting_user(&store, user)?;
            let event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            if !event.is_editable_by(&actor.id, actor.is_admin) {
                return Err("only the proposer or an admin can book this event".into());
            }
            store.set_booked(&id, true)?;
            println!("Event booked: {id}");
        }
        EventAction::Unbook { id, user } => {
            let actor = acting_user(&store, user)?;
            let event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            if !event.is_editable_by(&actor.id, actor.is_admin) {
                return Err("only the proposer or an admin can unbook this event".into());
            }
            store.set_booked(&id, false)?;
            println!("Event unbooked: {id}");
        }
        EventAction::Delete { id, user } => {
            let actor = acting_user(&store, user)?;
            let event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            if !event.is_editable_by(&actor.id, actor.is_admin) {
                return Err("only the proposer or an admin can delete this event".into());
            }
            store.delete_event(&id)?;
            println!("Event deleted: {id}");
        }
        EventAction::Ics { id, dir } => {
            let event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            let config = Config::load_or_default();
            let url = event_url(&config, &event.id);
            let path = calendar::write_ics(&event, Some(url.as_str()), &dir)?;
            println!("Calendar file written: {}", path.display());
        }
        EventAction::Share { id } => {
            let event = store
                .get_event(&id)?
                .ok_or(format!("Event not found: {id}"))?;
            let config = Config::load_or_default();
            let url = event_url(&config, &event.id);
            let roster = event.roster();
            let names = resolve_names(&store, &roster.confirmed)?;
            println!("{}", calendar::share_message(&event, &names, &url));
        }
    }
    Ok(())
}

fn resolve_names(
    store: &EventStore,
    ids: &[String],
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut names = Vec::new();
    for id in ids {
        let name = store
            .get_user(id)?
            .map(|u| u.username)
            .unwrap_or_else(|| id.clone());
        names.push(name);
    }
    Ok(names)
}

/// Forecast for the event's date and course, if one is available.
/// Lookup failures just mean no conditions in the view.
fn fetch_forecast(
    config: &Config,
    event: &Event,
    today: NaiveDate,
) -> Option<WeatherObservation> {
    let runtime = tokio::runtime::Runtime::new().ok()?;
    let client = WeatherClient::with_base_url(config.weather.base_url.as_str());
    let latitude = event.latitude.unwrap_or(config.weather.latitude);
    let longitude = event.longitude.unwrap_or(config.weather.longitude);
    runtime
        .block_on(client.daily_forecast(event.date, Some(latitude), Some(longitude), today))
        .ok()
        .flatten()
}
