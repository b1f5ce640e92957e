//! RSVP commands.

use clap::Subcommand;
use golfgang_core::storage::database::EventStore;
use golfgang_core::Response;

use super::{acting_user, parse_preferences};

#[derive(Subcommand)]
pub enum RsvpAction {
    /// RSVP as available
    In {
        /// Event ID
        event: String,
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
        /// Course wish
        #[arg(long)]
        course_note: Option<String>,
    },
    /// RSVP as unavailable
    Out {
        /// Event ID
        event: String,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Withdraw an RSVP entirely
    Withdraw {
        /// Event ID
        event: String,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Remove another player's RSVP (admin only)
    Remove {
        /// Event ID
        event: String,
        /// Player to remove
        target: String,
        /// Acting user id (defaults to identity.user_id)
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: RsvpAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = EventStore::open()?;

    match action {
        RsvpAction::In {
            event,
            user,
            time,
            transport,
            format,
            course_note,
        } => {
            let actor = acting_user(&store, user)?;
            let found = store
                .get_event(&event)?
                .ok_or(format!("Event not found: {event}"))?;
            let preferences = parse_preferences(time, transport, format, course_note)?;
            store.upsert_response(&found.id, &actor.id, &Response::available(preferences))?;

            let updated = store
                .get_event(&found.id)?
                .ok_or(format!("Event not found: {event}"))?;
            println!("{} is in for {}", actor.username, updated.display_title());
            println!("{}", serde_json::to_string_pretty(&updated.roster())?);
        }
        RsvpAction::Out { event, user } => {
            let actor = acting_user(&store, user)?;
            let found = store
                .get_event(&event)?
                .ok_or(format!("Event not found: {event}"))?;
            // Going out drops any stored preferences with the status change
            store.upsert_response(&found.id, &actor.id, &Response::unavailable())?;
            println!("{} is out for {}", actor.username, found.display_title());
        }
        RsvpAction::Withdraw { event, user } => {
            let actor = acting_user(&store, user)?;
            if store.delete_response(&event, &actor.id)? {
                println!("RSVP withdrawn");
            } else {
                println!("No RSVP to withdraw");
            }
        }
        RsvpAction::Remove {
            event,
            target,
            user,
        } => {
            let actor = acting_user(&store, user)?;
            if !actor.is_admin {
                return Err("only admins can remove another player's RSVP".into());
            }
            if store.delete_response(&event, &target)? {
                println!("Removed {target} from the event");
            } else {
                println!("No RSVP found for {target}");
            }
        }
    }
    Ok(())
}
