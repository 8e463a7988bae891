/// Configuration system for pitwall.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::PitwallConfig::default()`]
/// 2. **User global config**: `~/.pitwall/config.toml`
/// 3. **Project local config**: `.pitwall.toml` in the current working directory
/// 4. **Environment variables**: `PITWALL_*` overrides (highest precedence)
///
/// The result is resolved once in `main` and passed down by reference. There
/// is no runtime reconfiguration: a changed file takes effect on the next
/// invocation.
///
/// # Usage
///
/// ```rust,ignore
/// let cfg = pitwall::config::load();
/// let client = pitwall::api::BackendClient::from_config(&cfg);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::PitwallConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved pitwall configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> PitwallConfig {
    load_layers(
        global_config_path().as_deref(),
        project_config_path().as_deref(),
        |key| std::env::var(key).ok(),
    )
}

/// Resolve the layers from explicit file locations and an env lookup.
///
/// `load` is this with the real paths and `std::env::var`; tests pass their
/// own so they never touch the process environment.
pub fn load_layers(
    global: Option<&Path>,
    project: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> PitwallConfig {
    let mut config = PitwallConfig::default();

    if let Some(global) = load_toml_file(global) {
        merge_config(&mut config, &global);
    }

    if let Some(project) = load_toml_file(project) {
        merge_config(&mut config, &project);
    }

    apply_env_overrides(&mut config, env);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A broken file must not keep the views from
/// starting, so it is skipped rather than reported.
fn load_toml_file(path: Option<&Path>) -> Option<PitwallConfig> {
    let path = path?;
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge a loaded config layer into the base config.
///
/// Each file is deserialized with `serde(default)`, so keys a user left out
/// already carry the built-in defaults. The overlay therefore replaces the
/// base wholesale; a project file that sets only `backend.url` also resets
/// anything the global file changed.
fn merge_config(base: &mut PitwallConfig, overlay: &PitwallConfig) {
    *base = overlay.clone();
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.pitwall/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pitwall").join("config.toml"))
}

/// Path to the project local config: `.pitwall.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".pitwall.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `PITWALL_BACKEND_URL`: backend base URL
/// - `PITWALL_TIMEOUT_MS`: request timeout
/// - `PITWALL_NO_COLOR`: plain output (`1`/`true`/`yes`/`on`)
/// - `PITWALL_LOG`: request log on/off
fn apply_env_overrides(config: &mut PitwallConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(val) = env("PITWALL_BACKEND_URL")
        && !val.trim().is_empty()
    {
        config.backend.url = val.trim().to_string();
    }
    if let Some(val) = env("PITWALL_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.backend.timeout_ms = ms;
    }
    if let Some(val) = env("PITWALL_NO_COLOR")
        && is_truthy(&val)
    {
        config.display.color = false;
    }
    if let Some(val) = env("PITWALL_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.pitwall/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    init_config_at(&path, force)?;
    Ok(path)
}

fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, PitwallConfig::default_toml()).context("failed to write config file")
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `backend.url`. When no file exists yet the
/// defaults are written first, so the key's type is always known.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)
}

fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let content = if path.exists() {
        fs::read_to_string(path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&PitwallConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;
    root.clone()
        .try_into::<PitwallConfig>()
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The new value is parsed with the type of the value it replaces.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted, e.g. backend.url (got '{key}')");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        None if section_path == "display.team_colors" => {
            toml::Value::String(raw_value.to_string())
        }
        Some(_) => anyhow::bail!("'{key}' cannot be set from the command line"),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Render a resolved config as TOML for `pitwall config show`.
pub fn show_effective_config(config: &PitwallConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_layers(
            Some(&dir.path().join("absent.toml")),
            None,
            no_env,
        );
        assert_eq!(config, PitwallConfig::default());
    }

    #[test]
    fn project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(&global, "[backend]\nurl = \"http://global:1\"\n").unwrap();
        fs::write(&project, "[backend]\nurl = \"http://project:2\"\n").unwrap();

        let config = load_layers(Some(&global), Some(&project), no_env);
        assert_eq!(config.backend.url, "http://project:2");
    }

    #[test]
    fn malformed_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "[backend\nurl = ").unwrap();

        let config = load_layers(Some(&global), None, no_env);
        assert_eq!(config.backend.url, schema::DEFAULT_BACKEND_URL);
    }

    #[test]
    fn env_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "[backend]\nurl = \"http://file:1\"\ntimeout_ms = 500\n").unwrap();

        let config = load_layers(Some(&global), None, |key| match key {
            "PITWALL_BACKEND_URL" => Some("http://env:3".to_string()),
            "PITWALL_TIMEOUT_MS" => Some("2500".to_string()),
            "PITWALL_NO_COLOR" => Some("1".to_string()),
            "PITWALL_LOG" => Some("off".to_string()),
            _ => None,
        });
        assert_eq!(config.backend.url, "http://env:3");
        assert_eq!(config.backend.timeout_ms, 2500);
        assert!(!config.display.color);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn blank_url_and_bad_timeout_are_ignored() {
        let config = load_layers(None, None, |key| match key {
            "PITWALL_BACKEND_URL" => Some("   ".to_string()),
            "PITWALL_TIMEOUT_MS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.backend.url, schema::DEFAULT_BACKEND_URL);
        assert_eq!(config.backend.timeout_ms, schema::DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        for yes in ["1", "true", "TRUE", "yes", "on", "ON"] {
            assert!(is_truthy(yes), "{yes}");
        }
        for no in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(no), "{no}");
        }
    }

    #[test]
    fn set_toml_value_keeps_types() {
        let mut root: toml::Value = toml::from_str(
            "[backend]\nurl = \"http://a\"\ntimeout_ms = 100\n[display]\ncolor = true\n",
        )
        .unwrap();

        set_toml_value(&mut root, "backend.url", "http://b").unwrap();
        set_toml_value(&mut root, "backend.timeout_ms", "250").unwrap();
        set_toml_value(&mut root, "display.color", "off").unwrap();

        assert_eq!(root["backend"]["url"].as_str(), Some("http://b"));
        assert_eq!(root["backend"]["timeout_ms"].as_integer(), Some(250));
        assert_eq!(root["display"]["color"].as_bool(), Some(false));
    }

    #[test]
    fn set_toml_value_adds_team_colors() {
        let mut root: toml::Value =
            toml::from_str("[display]\ncolor = true\n[display.team_colors]\n").unwrap();
        set_toml_value(&mut root, "display.team_colors.Cadillac", "#C0C0C0").unwrap();
        assert_eq!(
            root["display"]["team_colors"]["Cadillac"].as_str(),
            Some("#C0C0C0")
        );
    }

    #[test]
    fn set_toml_value_rejects_bad_input() {
        let mut root: toml::Value = toml::from_str("[backend]\ntimeout_ms = 100\n").unwrap();
        assert!(set_toml_value(&mut root, "backend.timeout_ms", "fast").is_err());
        assert!(set_toml_value(&mut root, "backend.missing", "x").is_err());
        assert!(set_toml_value(&mut root, "nowhere.key", "x").is_err());
        assert!(set_toml_value(&mut root, "backend", "x").is_err());
    }

    #[test]
    fn set_rejects_values_the_schema_cannot_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_config_value_at(&path, "backend.url", "http://race-data:9000").unwrap();
        assert!(set_config_value_at(&path, "backend.timeout_ms", "-1").is_err());
        assert!(set_config_value_at(&path, "live.feed_len", "-3").is_err());

        let config = load_layers(Some(&path), None, no_env);
        assert_eq!(config.backend.url, "http://race-data:9000");
        assert_eq!(config.backend.timeout_ms, schema::DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn init_then_set_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pitwall").join("config.toml");

        init_config_at(&path, false).unwrap();
        assert!(init_config_at(&path, false).is_err(), "second init needs --force");

        set_config_value_at(&path, "live.radio_ms", "1500").unwrap();
        let config = load_layers(Some(&path), None, no_env);
        assert_eq!(config.live.radio_ms, 1500);
        assert_eq!(config.live.positions_ms, 2000);
    }

    #[test]
    fn set_without_existing_file_starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        set_config_value_at(&path, "backend.url", "http://fresh:7").unwrap();
        let config = load_layers(Some(&path), None, no_env);
        assert_eq!(config.backend.url, "http://fresh:7");
        assert_eq!(config.backend.timeout_ms, schema::DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn show_effective_config_parses_back() {
        let config = PitwallConfig::default();
        let shown = show_effective_config(&config).unwrap();
        let parsed: PitwallConfig = toml::from_str(&shown).unwrap();
        assert_eq!(parsed, config);
    }
}
