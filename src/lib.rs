//! pitwall: terminal client for the motorsport analytics backend.
//!
//! Standings and team views, a simulated live timing dashboard, and the
//! Pit Wall AI chat. The binary in `main.rs` is a thin clap layer over the
//! [`cli`] handlers; everything else is usable as a library.

pub mod analytics;
pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod live;
pub mod session;
pub mod teams;
pub mod utils;
pub mod views;
