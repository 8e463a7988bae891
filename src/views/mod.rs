//! Terminal renderings of the pitwall surfaces.
//!
//! Each view is a function from state to a `String`; printing is left to
//! the caller. Styling goes through `colored`, so whether escape codes are
//! emitted follows the process-wide override set from `[display] color`.

pub mod chat;
pub mod drivers;
pub mod home;
pub mod live;
pub mod races;
pub mod teams;

use colored::{ColoredString, Colorize};

use crate::api::{Driver, FetchError, StandingsSource};
use crate::teams::Rgb;

/// Width of the `===` rule under view headings.
const RULE_WIDTH: usize = 60;

/// Standings as a view sees them.
///
/// A failed fetch is not an error state. The view keeps showing its loading
/// line until the next mount fetches again.
#[derive(Debug, Clone, PartialEq)]
pub enum Standings {
    Loading,
    Loaded(Vec<Driver>),
}

impl Standings {
    pub fn from_result(result: Result<Vec<Driver>, FetchError>) -> Self {
        match result {
            Ok(drivers) => Self::Loaded(drivers),
            Err(_) => Self::Loading,
        }
    }

    /// Fetch afresh from `source`.
    pub fn fetch(source: &impl StandingsSource) -> Self {
        Self::from_result(source.fetch_standings())
    }

    /// The loaded drivers, or nothing while loading.
    pub fn drivers(&self) -> &[Driver] {
        match self {
            Self::Loading => &[],
            Self::Loaded(drivers) => drivers,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn find_driver(&self, driver_id: &str) -> Option<&Driver> {
        self.drivers().iter().find(|d| d.driver_id == driver_id)
    }
}

/// Points without a trailing `.0` for whole numbers (`300`, `12.5`).
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 && points.abs() < 1e15 {
        format!("{points:.0}")
    } else {
        format!("{points}")
    }
}

pub(crate) fn heading(title: &str) -> String {
    format!("{}\n{}", title.bold().cyan(), "=".repeat(RULE_WIDTH))
}

pub(crate) fn section(title: &str) -> String {
    title.bold().cyan().to_string()
}

pub(crate) fn paint(text: &str, rgb: Rgb) -> ColoredString {
    let Rgb(r, g, b) = rgb;
    text.truecolor(r, g, b)
}
