/// Backend collaborators of the views.
///
/// The views depend on two narrow traits rather than on the HTTP client:
///
/// - [`StandingsSource`]: the ordered standings list
/// - [`ChatBackend`]: one question in, one pit wall reply out
///
/// [`BackendClient`] implements both against the real backend. Tests and
/// offline runs substitute their own implementations.
pub mod client;
pub mod errors;
pub mod types;

pub use client::BackendClient;
pub use errors::{ChatError, FetchError};
pub use types::{Driver, HealthStatus, Race};

/// Source of the championship standings.
pub trait StandingsSource {
    /// Fetch the standings in the order the backend provides.
    ///
    /// Implementations must not sort or de-duplicate; each call fetches
    /// afresh.
    fn fetch_standings(&self) -> Result<Vec<Driver>, FetchError>;
}

/// The pit wall assistant.
pub trait ChatBackend {
    /// Send one user message and return the assistant's reply.
    ///
    /// `message` is passed through untouched; emptiness is the caller's
    /// concern. `context` is free-form prose describing the asking view.
    fn send_chat_message(
        &self,
        message: &str,
        session_id: &str,
        context: Option<&str>,
    ) -> Result<String, ChatError>;
}

impl<T: StandingsSource + ?Sized> StandingsSource for &T {
    fn fetch_standings(&self) -> Result<Vec<Driver>, FetchError> {
        (**self).fetch_standings()
    }
}

impl<T: ChatBackend + ?Sized> ChatBackend for &T {
    fn send_chat_message(
        &self,
        message: &str,
        session_id: &str,
        context: Option<&str>,
    ) -> Result<String, ChatError> {
        (**self).send_chat_message(message, session_id, context)
    }
}
