//! Driver standings list and driver detail.

use std::fmt::Write as _;

use colored::Colorize;

use super::{Standings, format_points, heading, paint, section};
use crate::api::Driver;
use crate::live::mock::{CIRCUIT_NAME, DriverAnalytics};
use crate::teams::TeamPalette;
use crate::utils::text::{pad_right, truncate};

pub const LIST_LOADING: &str = "Loading standings...";
pub const DETAIL_LOADING: &str = "Loading driver data...";

/// Standings list. `limit` caps the number of rows (the home preview);
/// otherwise one row per driver, in the order given.
pub fn render_driver_list(
    standings: &Standings,
    limit: Option<usize>,
    palette: &TeamPalette,
) -> String {
    let mut out = String::new();
    out.push_str(&heading("DRIVERS · Championship Standings"));
    out.push('\n');

    match standings {
        Standings::Loading => {
            let _ = writeln!(out, "  {}", LIST_LOADING.dimmed());
        }
        Standings::Loaded(drivers) => {
            let shown = limit.unwrap_or(drivers.len());
            for driver in drivers.iter().take(shown) {
                out.push_str(&render_driver_row(driver, palette));
                out.push('\n');
            }
        }
    }
    out
}

/// One standings row: position, name, team, points.
pub fn render_driver_row(driver: &Driver, palette: &TeamPalette) -> String {
    let position = format!("P{}", driver.position);
    let team = truncate(&driver.team, 22);
    format!(
        "  {} {} {} {:>6} {}",
        pad_right(&position.bold().to_string(), 4),
        pad_right(&truncate(&driver.name, 24), 24),
        pad_right(&paint(&team, palette.color_for(&driver.team)).to_string(), 22),
        format_points(driver.points),
        "PTS".dimmed(),
    )
}

/// Driver header plus the placeholder analytics panels.
pub fn render_driver_detail(
    driver: &Driver,
    analytics: &DriverAnalytics,
    palette: &TeamPalette,
) -> String {
    let color = palette.color_for(&driver.team);
    let mut out = String::new();

    out.push_str(&heading(&driver.name.to_uppercase()));
    out.push('\n');
    let _ = write!(
        out,
        "  {} {}  {}",
        format!("#{}", driver.display_number()).bold(),
        paint(&driver.team, color).bold(),
        driver.nationality.as_deref().unwrap_or("").dimmed(),
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "  {}   {} {}",
        format!("P{}", driver.position).bold(),
        format_points(driver.points).bold(),
        "POINTS".dimmed(),
    );
    out.push('\n');

    let _ = writeln!(out, "{}", section(&format!("RACE ANALYTICS · {CIRCUIT_NAME}")));
    stat_line(&mut out, "Avg laptime", &analytics.avg_laptime);
    stat_line(&mut out, "Avg position", &format!("P{}", analytics.avg_position));
    stat_line(&mut out, "Fastest lap", &analytics.fastest_lap);
    stat_line(&mut out, "Best finish", &format!("P{}", analytics.best_finish));
    stat_line(&mut out, "Best qualifying", &format!("P{}", analytics.best_qualifying));
    stat_line(&mut out, "Spa podiums", &analytics.circuit_podiums.to_string());
    let _ = writeln!(out, "  {}", analytics.insight.italic());
    out.push('\n');

    let _ = writeln!(out, "{}", section("PERFORMANCE ANALYTICS"));
    stat_line(&mut out, "Race wins", &analytics.race_wins.to_string());
    stat_line(&mut out, "Podiums", &analytics.podiums.to_string());
    stat_line(&mut out, "Fastest laps", &analytics.fastest_laps.to_string());
    stat_line(
        &mut out,
        "Points / race",
        &format!("{:.1}", analytics.points_per_race),
    );
    let _ = writeln!(out, "  {}", "Season form (last 5)".dimmed());
    for (i, value) in analytics.form.iter().enumerate() {
        let bar = "█".repeat((*value as usize) / 5);
        let _ = writeln!(out, "    R{} {} {value}%", i + 1, paint(&bar, color));
    }
    out
}

pub(crate) fn stat_line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<18} {}", format!("{label}:").bold(), value);
}
