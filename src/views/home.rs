//! Landing view: standings preview and headlines.

use std::fmt::Write as _;

use colored::Colorize;

use super::drivers::render_driver_list;
use super::{Standings, section};
use crate::teams::TeamPalette;

/// Rows shown in the standings preview.
pub const PREVIEW_ROWS: usize = 6;

/// Static headlines: `(title, summary)`.
pub const NEWS: [(&str, &str); 3] = [
    (
        "Formula 1 Championship Battle Intensifies",
        "Latest updates from the championship standings",
    ),
    (
        "Technical Regulations Update",
        "New aerodynamic rules for upcoming season",
    ),
    (
        "Driver Market Analysis",
        "Potential moves and contract negotiations",
    ),
];

pub fn render_home(standings: &Standings, palette: &TeamPalette) -> String {
    let mut out = render_driver_list(standings, Some(PREVIEW_ROWS), palette);
    out.push('\n');
    let _ = writeln!(out, "{}", section("LATEST NEWS"));
    for (title, summary) in NEWS {
        let _ = writeln!(out, "  {} {}", "•".cyan(), title.bold());
        let _ = writeln!(out, "    {}", summary.dimmed());
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "  {} `pitwall drivers` · `pitwall teams` · `pitwall live` · `pitwall chat`",
        "More:".dimmed()
    );
    out
}
