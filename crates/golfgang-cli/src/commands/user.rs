//! Group member commands.

use chrono::Utc;
use clap::Subcommand;
use golfgang_core::storage::database::EventStore;
use golfgang_core::User;

#[derive(Subcommand)]
pub enum UserAction {
    /// Add a member
    Add {
        /// User id (short handle, e.g. "alice")
        id: String,
        /// Display name
        username: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
    /// List members
    List,
    /// Grant or revoke admin rights
    SetAdmin {
        /// User id
        id: String,
        /// true to grant, false to revoke
        admin: bool,
    },
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = EventStore::open()?;

    match action {
        UserAction::Add {
            id,
            username,
            email,
            admin,
        } => {
            let user = User {
                id,
                username,
                email,
                is_admin: admin,
                created_at: Utc::now(),
            };
            store.create_user(&user)?;
            println!("User added: {}", user.id);
        }
        UserAction::List => {
            let users = store.list_users()?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        UserAction::SetAdmin { id, admin } => {
            if store.set_admin(&id, admin)? {
                println!("ok");
            } else {
                return Err(format!("User not found: {id}").into());
            }
        }
    }
    Ok(())
}
