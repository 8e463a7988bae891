use anyhow::Result;
use clap::{Parser, Subcommand};

use pitwall::{cli, config};

#[derive(Debug, Parser)]
#[command(name = "pitwall")]
#[command(about = "F1 standings, live timing and the Pit Wall AI in your terminal")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Top of the standings and the latest headlines
    Home,
    /// Full driver championship standings
    Drivers,
    /// Driver detail and analytics, then chat about the driver
    Driver {
        /// Driver id as used by the backend (e.g. `verstappen`)
        id: String,
        /// Ask one question and exit instead of starting a chat session
        #[arg(long)]
        ask: Option<String>,
    },
    /// Constructors grouped from the driver standings
    Teams,
    /// Team detail and analytics, then chat about the team
    Team {
        /// Team name exactly as in the standings (e.g. "Red Bull Racing")
        name: String,
        /// Ask one question and exit instead of starting a chat session
        #[arg(long)]
        ask: Option<String>,
    },
    /// Talk to the Pit Wall AI
    Chat {
        /// Ask one question and exit instead of starting a chat session
        #[arg(long)]
        ask: Option<String>,
    },
    /// Simulated live timing dashboard
    Live {
        /// How long to run before disconnecting
        #[arg(long, default_value = "60")]
        seconds: u64,
    },
    /// Recently completed races
    Races,
    /// Check config sources and backend reachability
    Health,
    /// Summarize the backend request log
    Log {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Manage pitwall configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Create a default config file at ~/.pitwall/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a configuration value (e.g. `pitwall config set backend.url http://host:8001`)
    Set {
        /// Dotted key path (e.g. backend.timeout_ms)
        key: String,
        /// Value to set
        value: String,
    },
    /// Reset configuration to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let cfg = config::load();

    if !cfg.display.color {
        colored::control::set_override(false);
    }

    match app.command {
        Commands::Home => cli::run_home(&cfg),
        Commands::Drivers => cli::run_drivers(&cfg),
        Commands::Driver { id, ask } => cli::run_driver(&cfg, &id, ask.as_deref()),
        Commands::Teams => cli::run_teams(&cfg),
        Commands::Team { name, ask } => cli::run_team(&cfg, &name, ask.as_deref()),
        Commands::Chat { ask } => cli::run_chat(&cfg, ask.as_deref()),
        Commands::Live { seconds } => cli::run_live(&cfg, seconds),
        Commands::Races => cli::run_races(&cfg),
        Commands::Health => cli::run_health(&cfg),
        Commands::Log { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_log(fmt, days)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&cfg),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
