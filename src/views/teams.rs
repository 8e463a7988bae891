//! Constructors list and team detail.

use std::fmt::Write as _;

use colored::Colorize;

use super::drivers::stat_line;
use super::{Standings, format_points, heading, paint, section};
use crate::live::mock::{CIRCUIT_NAME, TeamAnalytics};
use crate::teams::{Team, TeamPalette, group_by_team};
use crate::utils::text::{pad_right, truncate};

pub const DETAIL_LOADING: &str = "Loading team data...";

/// All teams, grouped from the standings.
pub fn render_team_list(standings: &Standings, palette: &TeamPalette) -> String {
    let mut out = String::new();
    out.push_str(&heading("TEAMS · Constructors"));
    out.push('\n');

    if standings.is_loading() {
        let _ = writeln!(out, "  {}", super::drivers::LIST_LOADING.dimmed());
        return out;
    }

    for team in group_by_team(standings.drivers()) {
        let color = palette.color_for(&team.name);
        let _ = writeln!(
            out,
            "  {} {:>6} {}",
            pad_right(&paint(&team.name, color).bold().to_string(), 24),
            format_points(team.points()),
            "TEAM POINTS".dimmed(),
        );
        for driver in &team.drivers {
            let _ = writeln!(
                out,
                "      {} {} {}",
                pad_right(&format!("P{}", driver.position), 4),
                pad_right(&driver.name, 24),
                format!("{} pts", format_points(driver.points)).dimmed(),
            );
        }
    }
    out
}

/// Team header, lineup and the placeholder analytics panels.
pub fn render_team_detail(team: &Team, analytics: &TeamAnalytics, palette: &TeamPalette) -> String {
    let color = palette.color_for(&team.name);
    let mut out = String::new();

    out.push_str(&heading(&team.name.to_uppercase()));
    out.push('\n');
    let best = team
        .best_position()
        .map(|p| format!("P{p}"))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "  {} {}   {} {}",
        best.bold(),
        "BEST DRIVER".dimmed(),
        format_points(team.points()).bold(),
        "TEAM POINTS".dimmed(),
    );
    out.push('\n');

    let _ = writeln!(out, "{}", section("DRIVER LINEUP"));
    for driver in &team.drivers {
        let _ = writeln!(
            out,
            "  {} {} {}",
            pad_right(&paint(&format!("#{}", driver.display_number()), color).to_string(), 4),
            pad_right(&driver.name, 24),
            format!("P{} · {} pts", driver.position, format_points(driver.points)).dimmed(),
        );
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "{}",
        section(&format!("TEAM RACE ANALYTICS · {CIRCUIT_NAME}"))
    );
    stat_line(&mut out, "Avg team laptime", &analytics.avg_laptime);
    stat_line(&mut out, "Avg team position", &format!("P{}", analytics.avg_position));
    stat_line(&mut out, "Team fastest lap", &analytics.fastest_lap);
    stat_line(&mut out, "Best team finish", &format!("P{}", analytics.best_finish));
    stat_line(&mut out, "Best qualifying", &format!("P{}", analytics.best_qualifying));
    stat_line(&mut out, "Spa wins", &analytics.circuit_wins.to_string());
    let _ = writeln!(out, "  {}", analytics.insight.italic());
    out.push('\n');

    let _ = writeln!(out, "{}", section("TEAM PERFORMANCE"));
    stat_line(&mut out, "Total wins", &analytics.wins.to_string());
    stat_line(&mut out, "Total podiums", &analytics.podiums.to_string());
    stat_line(&mut out, "Fastest laps", &analytics.fastest_laps.to_string());
    stat_line(
        &mut out,
        "Avg points / race",
        &format!("{:.1}", analytics.points_per_race),
    );
    let _ = writeln!(out, "  {}", "Driver comparison".dimmed());
    for (name, share) in &analytics.points_share {
        let bar = "█".repeat((share / 5.0).round() as usize);
        let _ = writeln!(
            out,
            "    {} {} ({share:.1}%)",
            pad_right(&truncate(name, 18), 18),
            paint(&bar, color),
        );
    }
    out
}
