//! Recent race results.

use std::fmt::Write as _;

use colored::Colorize;

use super::heading;
use crate::api::{FetchError, Race};
use crate::utils::text::{pad_right, truncate};

pub fn render_races(races: &Result<Vec<Race>, FetchError>) -> String {
    let mut out = String::new();
    out.push_str(&heading("RECENT RACES"));
    out.push('\n');

    match races {
        Err(_) => {
            let _ = writeln!(out, "  {}", "Loading races...".dimmed());
        }
        Ok(races) if races.is_empty() => {
            let _ = writeln!(out, "  {}", "No completed races yet.".yellow());
        }
        Ok(races) => {
            for race in races {
                let winner = race.winner().unwrap_or_else(|| "-".to_string());
                let _ = writeln!(
                    out,
                    "  {} {} {} {}",
                    pad_right(&format!("R{}", race.round), 4),
                    pad_right(&truncate(&race.race_name, 28).bold().to_string(), 28),
                    pad_right(&race.date, 10),
                    winner.green(),
                );
                let _ = writeln!(
                    out,
                    "       {}",
                    format!("{} · {}", race.circuit_name, race.season).dimmed()
                );
            }
        }
    }
    out
}
