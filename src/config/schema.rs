/// Configuration schema and defaults for pitwall.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[backend]`, `[live]`, `[display]` and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default analytics backend, matching the development server port.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Default timeout for backend calls.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level pitwall configuration.
///
/// Maps directly to the `~/.pitwall/config.toml` and `.pitwall.toml` file
/// schemas. Built once at startup and handed to the clients and views by
/// reference; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitwallConfig {
    pub backend: BackendConfig,
    pub live: LiveConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

/// Where the analytics backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL; endpoint paths (`/api/...`) are appended to it.
    pub url: String,
    /// Per-request timeout in milliseconds. Exceeding it counts as a
    /// transport failure.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ---------------------------------------------------------------------------
// [live]
// ---------------------------------------------------------------------------

/// Refresh cadence of the simulated live dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Interval between position/telemetry/weather frames.
    pub positions_ms: u64,
    /// Interval between team radio messages.
    pub radio_ms: u64,
    /// Interval between race-control updates.
    pub updates_ms: u64,
    /// How many radio messages and race updates stay on screen.
    pub feed_len: usize,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            positions_ms: 2000,
            radio_ms: 5000,
            updates_ms: 8000,
            feed_len: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// [display]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Emit ANSI colors. Also disabled by `PITWALL_NO_COLOR=1`.
    pub color: bool,
    /// Extra or replacement livery colors, team name → `#RRGGBB`.
    pub team_colors: BTreeMap<String, String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            team_colors: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Request log settings (`~/.pitwall/request-log.jsonl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl PitwallConfig {
    /// Annotated default config written by `pitwall config init`.
    pub fn default_toml() -> String {
        r##"# pitwall configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (PITWALL_*)
#   2. Project config (.pitwall.toml in current directory)
#   3. User global config (~/.pitwall/config.toml)
#   4. Built-in defaults

[backend]
url = "http://localhost:8001"   # or PITWALL_BACKEND_URL
timeout_ms = 10000              # or PITWALL_TIMEOUT_MS

[live]
positions_ms = 2000   # positions, telemetry and weather refresh
radio_ms = 5000       # team radio feed
updates_ms = 8000     # race control feed
feed_len = 5

[display]
color = true          # PITWALL_NO_COLOR=1 forces plain output

[display.team_colors]
# "Cadillac" = "#C0C0C0"

[logging]
enabled = true        # ~/.pitwall/request-log.jsonl
"##
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
