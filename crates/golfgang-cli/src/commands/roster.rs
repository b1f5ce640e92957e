//! Roster inspection.

use clap::Subcommand;
use golfgang_core::preferences::summarize;
use golfgang_core::storage::database::EventStore;

#[derive(Subcommand)]
pub enum RosterAction {
    /// Show the computed roster for an event
    Show {
        /// Event ID
        event: String,
        /// Include the confirmed players' preference summary
        #[arg(long)]
        preferences: bool,
    },
}

pub fn run(action: RosterAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = EventStore::open()?;

    match action {
        RosterAction::Show { event, preferences } => {
            let found = store
                .get_event(&event)?
                .ok_or(format!("Event not found: {event}"))?;
            let roster = found.roster();
            if preferences {
                let summary = summarize(&roster.confirmed, &found.responses);
                let view = serde_json::json!({
                    "roster": roster,
                    "preferences": summary,
                });
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&roster)?);
            }
        }
    }
    Ok(())
}
