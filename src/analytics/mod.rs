//! Request logging and its reporting.
//!
//! Every backend call made by [`crate::api::BackendClient`] appends one line
//! to `~/.pitwall/request-log.jsonl`; `pitwall log` summarizes the file.

pub mod logger;
pub mod reporter;
