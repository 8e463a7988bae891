//! Pit wall chat transcript.

use std::fmt::Write as _;

use colored::Colorize;

use super::section;
use crate::chat::{ChatMessage, ChatPanel, Role, SAMPLE_QUESTIONS};
use crate::live::mock::session_clock;

pub const USER_LABEL: &str = "YOU";
pub const ASSISTANT_LABEL: &str = "PIT WALL AI";
pub const THINKING: &str = "Analyzing F1 data...";

/// One transcript entry: sender line, then the indented text.
pub fn render_message(message: &ChatMessage) -> String {
    let sender = match message.role {
        Role::User => USER_LABEL.bold().cyan(),
        Role::Assistant => ASSISTANT_LABEL.bold().red(),
    };
    let mut out = match message.timestamp {
        Some(ts) => format!("{sender} {}\n", session_clock(ts).dimmed()),
        None => format!("{sender}\n"),
    };
    for line in message.content.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

/// The whole panel: welcome text while empty, then every message in order.
pub fn render_transcript(panel: &ChatPanel) -> String {
    let mut out = String::new();
    if panel.messages().is_empty() {
        let _ = writeln!(out, "{}", panel.context().welcome().dimmed());
    }
    for message in panel.messages() {
        out.push_str(&render_message(message));
    }
    if panel.is_pending() {
        let _ = writeln!(out, "{}", ASSISTANT_LABEL.bold().red());
        let _ = writeln!(out, "  {}", THINKING.dimmed());
    }
    out
}

/// Numbered sample question list.
pub fn render_samples() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section("SAMPLE QUESTIONS"));
    for (i, (label, question)) in SAMPLE_QUESTIONS.iter().enumerate() {
        let _ = writeln!(out, "  {} {:<30} {}", format!("{}.", i + 1).bold(), label, question.dimmed());
    }
    out
}
