/// HTTP client for the analytics backend.
///
/// Talks to the backend with the synchronous `ureq` client. Every call
/// carries the configured timeout; a timeout is reported exactly like any
/// other transport failure. Provides:
///
/// - **Standings**: `GET /api/drivers/standings`
/// - **Chat**: `POST /api/pit-wall/chat`
/// - **Health**: `GET /api/health`
/// - **Recent races**: `GET /api/races/recent`
///
/// The client holds no per-view state; views share one instance and keep
/// their own session ids and transcripts.
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::{ChatError, FetchError, RequestFailure};
use super::types::{ChatReply, ChatRequest, Driver, HealthStatus, Race};
use super::{ChatBackend, StandingsSource};
use crate::analytics::logger;
use crate::config::PitwallConfig;

pub const STANDINGS_PATH: &str = "/api/drivers/standings";
pub const CHAT_PATH: &str = "/api/pit-wall/chat";
pub const HEALTH_PATH: &str = "/api/health";
pub const RECENT_RACES_PATH: &str = "/api/races/recent";

/// Synchronous backend client built from the resolved config.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    timeout: Duration,
    log_requests: bool,
}

impl BackendClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &PitwallConfig) -> Self {
        Self {
            base_url: config.backend.url.trim_end_matches('/').to_string(),
            timeout: config.backend.timeout(),
            log_requests: config.logging.enabled,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /api/health`.
    pub fn health(&self) -> Result<HealthStatus, FetchError> {
        self.get_json(HEALTH_PATH).map_err(FetchError::from)
    }

    /// Fetch the most recent races, newest last as the backend orders them.
    pub fn recent_races(&self) -> Result<Vec<Race>, FetchError> {
        self.get_json(RECENT_RACES_PATH).map_err(FetchError::from)
    }

    fn url(&self, path: &str) -> String {
        let url = format!("{}{}", self.base_url, path);
        // On Windows, "localhost" may try IPv6 (::1) first and stall until
        // the timeout when the backend only binds IPv4.
        url.replace("://localhost", "://127.0.0.1")
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestFailure> {
        self.get_reply(path).map(|reply| reply.body)
    }

    fn get_reply<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>, RequestFailure> {
        let start = Instant::now();
        let result = ureq::get(&self.url(path))
            .timeout(self.timeout)
            .call()
            .map_err(RequestFailure::from)
            .and_then(Reply::decode);
        self.record("GET", path, start, &result);
        result
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestFailure> {
        let start = Instant::now();
        let result = ureq::post(&self.url(path))
            .timeout(self.timeout)
            .send_json(body)
            .map_err(RequestFailure::from)
            .and_then(Reply::decode);
        self.record("POST", path, start, &result);
        result.map(|reply| reply.body)
    }

    fn record<T>(
        &self,
        method: &str,
        path: &str,
        start: Instant,
        result: &Result<Reply<T>, RequestFailure>,
    ) {
        if !self.log_requests {
            return;
        }
        let latency_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(reply) => {
                logger::log_request(method, path, true, Some(reply.status), latency_ms, None)
            }
            Err(failure) => logger::log_request(
                method,
                path,
                false,
                failure.status(),
                latency_ms,
                Some(&failure.to_string()),
            ),
        }
    }
}

impl StandingsSource for BackendClient {
    fn fetch_standings(&self) -> Result<Vec<Driver>, FetchError> {
        self.get_json(STANDINGS_PATH).map_err(FetchError::from)
    }
}

impl ChatBackend for BackendClient {
    fn send_chat_message(
        &self,
        message: &str,
        session_id: &str,
        context: Option<&str>,
    ) -> Result<String, ChatError> {
        let body = ChatRequest {
            message,
            session_id,
            context,
        };
        let reply: ChatReply = self.post_json(CHAT_PATH, &body)?;
        Ok(reply.response)
    }
}

/// A decoded success body with the status it arrived with.
struct Reply<T> {
    status: u16,
    body: T,
}

impl<T: DeserializeOwned> Reply<T> {
    fn decode(resp: ureq::Response) -> Result<Self, RequestFailure> {
        let status = resp.status();
        let body = resp
            .into_json::<T>()
            .map_err(|e| RequestFailure::Decode(e.to_string()))?;
        Ok(Self { status, body })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
