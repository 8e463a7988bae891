//! Failure types of the data clients.
//!
//! The views never branch on the kind: any `FetchError` means "no standings
//! yet" and any `ChatError` means "post the fallback message". The kinds
//! exist for the request log and for `pitwall health`.

use thiserror::Error;

/// A backend read (standings, races, health) did not produce data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// The pit wall assistant did not answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("pit wall unreachable: {0}")]
    Transport(String),
    #[error("pit wall returned HTTP {0}")]
    Status(u16),
    #[error("unexpected pit wall reply: {0}")]
    Decode(String),
}

/// Client-internal classification shared by both public error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestFailure {
    Transport(String),
    Status(u16),
    Decode(String),
}

impl RequestFailure {
    pub(crate) fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(reason) => write!(f, "transport: {reason}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Decode(reason) => write!(f, "decode: {reason}"),
        }
    }
}

impl From<ureq::Error> for RequestFailure {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

impl From<RequestFailure> for FetchError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(reason) => Self::Transport(reason),
            RequestFailure::Status(code) => Self::Status(code),
            RequestFailure::Decode(reason) => Self::Decode(reason),
        }
    }
}

impl From<RequestFailure> for ChatError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(reason) => Self::Transport(reason),
            RequestFailure::Status(code) => Self::Status(code),
            RequestFailure::Decode(reason) => Self::Decode(reason),
        }
    }
}
