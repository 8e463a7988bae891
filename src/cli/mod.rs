//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `pitwall home | drivers | driver <id> | teams | team <name>`: standings views
//! - `pitwall chat`: general pit wall chat
//! - `pitwall live`: simulated live timing
//! - `pitwall races`: recent race results
//! - `pitwall health`: config sources and backend reachability
//! - `pitwall log`: request log summary
//! - `pitwall config show|init|set|reset`: configuration management

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::logger;
use crate::analytics::reporter::{self, RequestStats};
use crate::api::{BackendClient, ChatBackend};
use crate::chat::{ChatContext, ChatPanel, SubmitOutcome, sample_question};
use crate::config::{self, schema::PitwallConfig};
use crate::live::LiveDashboard;
use crate::live::mock::MockFeed;
use crate::live::ticker::{Schedule, Ticker};
use crate::teams::{TeamPalette, find_team};
use crate::utils::text::truncate;
use crate::views::{self, Standings};

/// Output format for `pitwall log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// pitwall home | drivers | teams
// ---------------------------------------------------------------------------

/// Standings preview and headlines.
pub fn run_home(cfg: &PitwallConfig) -> Result<()> {
    let standings = Standings::fetch(&BackendClient::from_config(cfg));
    print!("{}", views::home::render_home(&standings, &palette(cfg)));
    Ok(())
}

/// Full championship standings.
pub fn run_drivers(cfg: &PitwallConfig) -> Result<()> {
    let standings = Standings::fetch(&BackendClient::from_config(cfg));
    print!(
        "{}",
        views::drivers::render_driver_list(&standings, None, &palette(cfg))
    );
    Ok(())
}

/// Constructors grouped from the standings.
pub fn run_teams(cfg: &PitwallConfig) -> Result<()> {
    let standings = Standings::fetch(&BackendClient::from_config(cfg));
    print!("{}", views::teams::render_team_list(&standings, &palette(cfg)));
    Ok(())
}

// ---------------------------------------------------------------------------
// pitwall driver <id> | team <name>
// ---------------------------------------------------------------------------

/// Driver detail, then a chat scoped to that driver.
pub fn run_driver(cfg: &PitwallConfig, driver_id: &str, ask: Option<&str>) -> Result<()> {
    let client = BackendClient::from_config(cfg);
    let standings = Standings::fetch(&client);

    let Some(driver) = standings.find_driver(driver_id) else {
        println!("{}", views::drivers::DETAIL_LOADING.dimmed());
        return Ok(());
    };

    let analytics = MockFeed::from_entropy().driver_analytics(driver);
    print!(
        "{}",
        views::drivers::render_driver_detail(driver, &analytics, &palette(cfg))
    );
    println!();
    println!("{}", views::section(&format!("ASK ABOUT {}", driver.name.to_uppercase())));

    let panel = ChatPanel::mount(ChatContext::for_driver(driver));
    run_chat_panel(panel, &client, ask)
}

/// Team detail, then a chat scoped to that team.
pub fn run_team(cfg: &PitwallConfig, name: &str, ask: Option<&str>) -> Result<()> {
    let client = BackendClient::from_config(cfg);
    let standings = Standings::fetch(&client);

    let Some(team) = find_team(standings.drivers(), name) else {
        println!("{}", views::teams::DETAIL_LOADING.dimmed());
        return Ok(());
    };

    let analytics = MockFeed::from_entropy().team_analytics(&team);
    print!(
        "{}",
        views::teams::render_team_detail(&team, &analytics, &palette(cfg))
    );
    println!();
    println!("{}", views::section(&format!("ASK ABOUT {}", team.name.to_uppercase())));

    let panel = ChatPanel::mount(ChatContext::for_team(&team.name));
    run_chat_panel(panel, &client, ask)
}

// ---------------------------------------------------------------------------
// pitwall chat
// ---------------------------------------------------------------------------

/// General pit wall chat.
pub fn run_chat(cfg: &PitwallConfig, ask: Option<&str>) -> Result<()> {
    let client = BackendClient::from_config(cfg);
    println!("{}", views::heading("PIT WALL AI · F1 Strategy Command Center"));
    if ask.is_none() {
        print!("{}", views::chat::render_samples());
    }
    run_chat_panel(ChatPanel::mount(ChatContext::General), &client, ask)
}

/// One-shot question when `ask` is given, otherwise the interactive loop.
fn run_chat_panel(mut panel: ChatPanel, backend: &impl ChatBackend, ask: Option<&str>) -> Result<()> {
    let result = match ask {
        Some(question) => {
            panel.submit(backend, question);
            print!("{}", views::chat::render_transcript(&panel));
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            chat_repl(&mut panel, backend, stdin.lock(), &mut stdout)
        }
    };
    panel.unmount();
    result
}

/// Interactive chat over arbitrary line input.
///
/// `/quit` or end of input leaves; `/samples` lists the sample questions and
/// a bare number sends the matching one. Anything else is submitted as is.
pub fn chat_repl(
    panel: &mut ChatPanel,
    backend: &impl ChatBackend,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "{}", views::chat::render_transcript(panel))?;
    writeln!(out, "{}", "Type a question, /samples, or /quit.".dimmed())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", ">".cyan().bold())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("Failed to read chat input")?;
        let trimmed = line.trim();

        let question = match trimmed {
            "/quit" | "/exit" => break,
            "/samples" => {
                write!(out, "{}", views::chat::render_samples())?;
                continue;
            }
            _ => match trimmed.parse::<usize>().ok().and_then(sample_question) {
                Some(sample) => {
                    writeln!(out, "{} {}", views::chat::USER_LABEL.cyan().bold(), sample)?;
                    sample
                }
                None => line.as_str(),
            },
        };

        if !panel.can_submit(question) {
            continue;
        }
        writeln!(out, "  {}", views::chat::THINKING.dimmed())?;
        let before = panel.messages().len();
        if panel.submit(backend, question) == SubmitOutcome::Ignored {
            continue;
        }
        // Skip the echoed user message; the reply is all that's new.
        for message in panel.messages().iter().skip(before + 1) {
            write!(out, "{}", views::chat::render_message(message))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// pitwall live
// ---------------------------------------------------------------------------

/// Simulated live timing for `seconds`, redrawn on every refresh.
pub fn run_live(cfg: &PitwallConfig, seconds: u64) -> Result<()> {
    let palette = palette(cfg);
    let mut dashboard = LiveDashboard::new(cfg.live.feed_len);
    let (ticker, events) = Ticker::spawn(Schedule::from_config(&cfg.live), MockFeed::from_entropy())?;

    let interactive = io::stdout().is_terminal();
    let deadline = live_deadline(Instant::now(), seconds);
    redraw(&views::live::render_live(&dashboard, &palette), interactive)?;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match events.recv_timeout(remaining) {
            Ok(event) => {
                dashboard.apply(event);
                redraw(&views::live::render_live(&dashboard, &palette), interactive)?;
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
        }
    }

    ticker.shutdown();
    dashboard.disconnect();
    redraw(&views::live::render_live(&dashboard, &palette), interactive)?;
    Ok(())
}

/// Longest live session; larger `--seconds` values are clamped.
const MAX_LIVE_SECONDS: u64 = 7 * 24 * 60 * 60;

fn live_deadline(start: Instant, seconds: u64) -> Instant {
    start + Duration::from_secs(seconds.min(MAX_LIVE_SECONDS))
}

fn redraw(frame: &str, interactive: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if interactive {
        // Clear screen, cursor home.
        write!(stdout, "\x1b[2J\x1b[H")?;
    } else {
        writeln!(stdout, "{}", "-".repeat(60).dimmed())?;
    }
    write!(stdout, "{frame}")?;
    stdout.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// pitwall races
// ---------------------------------------------------------------------------

/// Recent race results.
pub fn run_races(cfg: &PitwallConfig) -> Result<()> {
    let races = BackendClient::from_config(cfg).recent_races();
    print!("{}", views::races::render_races(&races));
    Ok(())
}

// ---------------------------------------------------------------------------
// pitwall health
// ---------------------------------------------------------------------------

/// Check config sources, backend reachability and the request log.
pub fn run_health(cfg: &PitwallConfig) -> Result<()> {
    println!("{}", "pitwall Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.pitwall/config.toml found"
        } else {
            "not found (run `pitwall config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".pitwall.toml found"
        } else {
            "none (optional)"
        },
    );

    let client = BackendClient::from_config(cfg);
    match client.health() {
        Ok(status) => print_health_item(
            "Backend",
            true,
            &format!("{} at {}", status.status, client.base_url()),
        ),
        Err(err) => print_health_item("Backend", false, &format!("{err} ({})", client.base_url())),
    }

    let standings = Standings::fetch(&client);
    print_health_item(
        "Standings",
        !standings.is_loading(),
        &if standings.is_loading() {
            "unavailable".to_string()
        } else {
            format!("{} drivers", standings.drivers().len())
        },
    );

    let log_exists = logger::request_log_path()
        .map(|p| p.exists())
        .unwrap_or(false);
    let (log_ok, log_detail) = request_log_health(cfg.logging.enabled, log_exists, || {
        logger::read_all_entries().len()
    });
    print_health_item("Request log", log_ok, &log_detail);

    Ok(())
}

/// The request log is healthy only while logging is on and the file exists.
fn request_log_health(
    enabled: bool,
    exists: bool,
    entries: impl FnOnce() -> usize,
) -> (bool, String) {
    if !enabled {
        (false, "disabled".to_string())
    } else if exists {
        (true, format!("{} entries", entries()))
    } else {
        (false, "no log file yet".to_string())
    }
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<18} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// pitwall log
// ---------------------------------------------------------------------------

/// Summarize the request log.
pub fn run_log(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let stats = reporter::compute_stats(days);

    if stats.total_requests == 0 {
        println!(
            "{}",
            "No requests logged yet. Browse some views to populate the log.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", stats_json(&stats)?),
        OutputFormat::Table => print_stats_table(&stats),
    }
    Ok(())
}

fn print_stats_table(stats: &RequestStats) {
    println!("{}", "pitwall Request Log".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
    println!("  {} {}", "Total requests:".bold(), stats.total_requests);
    println!(
        "  {} {} ({:.1}%)",
        "Failures:      ".bold(),
        stats.total_failures,
        stats.failure_pct()
    );
    println!();

    println!(
        "  {:<6} {:<26} {:>6} {:>8} {:>9}",
        "Method", "Endpoint", "Count", "Failed", "Avg ms"
    );
    println!("  {}", "-".repeat(58));
    for (i, ep) in stats.endpoints.iter().enumerate() {
        let line = format!(
            "  {:<6} {:<26} {:>6} {:>7.1}% {:>9}",
            ep.method,
            truncate(&ep.endpoint, 26),
            ep.count,
            ep.failure_pct(),
            ep.avg_latency_ms,
        );
        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
        if let Some(ref err) = ep.last_error {
            println!("         {} {}", "last error:".dimmed(), err.yellow());
        }
    }
}

fn stats_json(stats: &RequestStats) -> Result<String> {
    let value = serde_json::json!({
        "total_requests": stats.total_requests,
        "total_failures": stats.total_failures,
        "failure_pct": stats.failure_pct(),
        "endpoints": stats.endpoints.iter().map(|e| serde_json::json!({
            "method": e.method,
            "endpoint": e.endpoint,
            "count": e.count,
            "failures": e.failures,
            "avg_latency_ms": e.avg_latency_ms,
            "last_error": e.last_error,
        })).collect::<Vec<_>>(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

// ---------------------------------------------------------------------------
// pitwall config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(cfg: &PitwallConfig) -> Result<()> {
    let toml_str = config::show_effective_config(cfg)?;
    println!("{}", "Effective pitwall Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(global_exists, "~/.pitwall/config.toml");
    print_source(project_exists, ".pitwall.toml");
    println!(
        "  {} {}",
        "·".dimmed(),
        "PITWALL_* environment variables".dimmed()
    );
    Ok(())
}

fn print_source(exists: bool, label: &str) {
    if exists {
        println!("  {} {}", "✓".green(), label.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.pitwall/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to point pitwall at your backend.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

fn palette(cfg: &PitwallConfig) -> TeamPalette {
    TeamPalette::from_config(&cfg.display)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
