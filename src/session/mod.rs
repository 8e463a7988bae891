//! Chat session identity.
//!
//! Each chat surface gets one session id when it is mounted. The id ties the
//! surface's transcript to the backend-side conversation and is never reused
//! by another surface. Ids stay human-readable so they can be matched up
//! with backend logs:
//!
//! ```text
//! pitwall_1760610000000_0
//! driver_verstappen_1760610000000_1
//! team_Red_Bull_Racing_1760610000000_2
//! ```

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex must compile"));

/// Process-wide sequence; makes two ids minted in the same millisecond differ.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Which surface a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScope {
    /// The general pit wall page.
    PitWall,
    /// A driver detail page, keyed by `driver_id`.
    Driver(String),
    /// A team detail page, keyed by team name.
    Team(String),
}

impl SessionScope {
    /// Label that prefixes the session id.
    pub fn label(&self) -> String {
        match self {
            Self::PitWall => "pitwall".to_string(),
            Self::Driver(id) => format!("driver_{}", id.trim()),
            Self::Team(name) => format!("team_{}", WHITESPACE_RE.replace_all(name.trim(), "_")),
        }
    }
}

/// Mint a fresh session id for a surface.
pub fn new_session_id(scope: &SessionScope) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}_{}_{}", scope.label(), Utc::now().timestamp_millis(), seq)
}
