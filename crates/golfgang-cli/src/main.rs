use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "golfgang-cli", version, about = "GolfGang CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// RSVP to an event
    Rsvp {
        #[command(subcommand)]
        action: commands::rsvp::RsvpAction,
    },
    /// Roster inspection
    Roster {
        #[command(subcommand)]
        action: commands::roster::RosterAction,
    },
    /// Playing conditions
    Conditions {
        #[command(subcommand)]
        action: commands::conditions::ConditionsAction,
    },
    /// Group member management
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Rsvp { action } => commands::rsvp::run(action),
        Commands::Roster { action } => commands::roster::run(action),
        Commands::Conditions { action } => commands::conditions::run(action),
        Commands::User { action } => commands::user::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
