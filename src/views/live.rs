//! Live timing dashboard.

use std::fmt::Write as _;

use colored::Colorize;

use super::{paint, section};
use crate::live::LiveDashboard;
use crate::live::mock::{CIRCUIT_NAME, LiveFrame, RACE_NAME, Sector, session_clock};
use crate::teams::TeamPalette;
use crate::utils::text::{pad_right, truncate};

pub const CONNECTING: &str = "Connecting to F1 Live Timing...";

/// Telemetry tiles shown under the positions table.
const TELEMETRY_ROWS: usize = 10;

pub fn render_live(dashboard: &LiveDashboard, palette: &TeamPalette) -> String {
    let Some(frame) = dashboard.frame() else {
        return format!("{}\n", CONNECTING.dimmed());
    };

    let mut out = String::new();
    render_header(&mut out, frame, dashboard.is_connected());
    render_positions(&mut out, frame, palette);
    render_telemetry(&mut out, frame);

    out.push('\n');
    let _ = writeln!(out, "{}", section("DRIVER RADIO"));
    let mut any = false;
    for msg in dashboard.radio() {
        any = true;
        let _ = writeln!(
            out,
            "  {} {} {}",
            session_clock(msg.timestamp).dimmed(),
            msg.code.bold(),
            msg.message,
        );
    }
    if !any {
        let _ = writeln!(out, "  {}", "No recent radio messages".dimmed());
    }

    out.push('\n');
    let _ = writeln!(out, "{}", section("RACE CONTROL UPDATES"));
    let mut any = false;
    for update in dashboard.updates() {
        any = true;
        let _ = writeln!(
            out,
            "  {} {}",
            session_clock(update.timestamp).dimmed(),
            update.message,
        );
    }
    if !any {
        let _ = writeln!(out, "  {}", "No recent updates".dimmed());
    }
    out
}

fn render_header(out: &mut String, frame: &LiveFrame, connected: bool) {
    let status = if connected {
        "● LIVE".green().bold()
    } else {
        "● OFFLINE".red().bold()
    };
    let _ = writeln!(
        out,
        "{}  {}  RACE  {}  {}",
        RACE_NAME.bold().red(),
        frame.session_time,
        "GREEN".green(),
        status,
    );
    let w = &frame.weather;
    let _ = writeln!(
        out,
        "  AIR {}°C  TRACK {}°C  HUMIDITY {}%  WIND {} km/h",
        w.air_temp_c, w.track_temp_c, w.humidity_pct, w.wind_kph,
    );
    out.push('\n');
}

fn render_positions(out: &mut String, frame: &LiveFrame, palette: &TeamPalette) {
    let _ = writeln!(out, "{}", section(&format!("RACE POSITIONS · {CIRCUIT_NAME}")));
    for p in &frame.positions {
        let team = short_team(p.team);
        let sector = match p.sector {
            Sector::S1 => p.sector.to_string().purple(),
            Sector::S2 => p.sector.to_string().green(),
            Sector::S3 => p.sector.to_string().yellow(),
        };
        let _ = writeln!(
            out,
            "  {} {} {} {:>8} {:>9} {}",
            pad_right(&format!("P{}", p.pos), 4),
            p.code.bold(),
            pad_right(&paint(&truncate(&team, 14), palette.color_for(p.team)).to_string(), 14),
            p.gap,
            p.last_lap,
            sector,
        );
    }
}

fn render_telemetry(out: &mut String, frame: &LiveFrame) {
    out.push('\n');
    let _ = writeln!(out, "{}", section("LIVE TELEMETRY"));
    for (code, t) in frame.telemetry.iter().take(TELEMETRY_ROWS) {
        let _ = writeln!(
            out,
            "  {}  SPD {:>3}  GEA {}  RPM {:>5}",
            code.bold(),
            t.speed_kph,
            t.gear,
            t.rpm,
        );
    }
}

/// Team name without the ` F1 Team` / ` Racing` suffix.
fn short_team(team: &str) -> String {
    team.replace(" F1 Team", "").replace(" Racing", "")
}
