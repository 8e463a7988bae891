/// Integration tests for the backend client and the views that consume it.
///
/// Each test starts an in-process `tiny_http` server on an ephemeral port
/// that answers with canned bodies and records what it received. Request
/// logging is switched off so nothing is written under the home directory.
use std::collections::HashMap;
use std::io::Read;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use pitwall::api::{BackendClient, ChatBackend, ChatError, FetchError, StandingsSource};
use pitwall::chat::{ChatContext, ChatPanel, FALLBACK_REPLY, Role, SubmitOutcome};
use pitwall::config::PitwallConfig;
use pitwall::teams::{TeamPalette, group_by_team};
use pitwall::utils::text::strip_ansi;
use pitwall::views::Standings;
use pitwall::views::drivers::render_driver_list;
use tiny_http::{Header, Response, Server};

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

impl Recorded {
    fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct MockBackend {
    base_url: String,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
}

impl MockBackend {
    /// Serve `routes` (path → status, body) until dropped.
    fn start(routes: &[(&str, u16, &str)]) -> Self {
        Self::start_with_delay(routes, Duration::ZERO)
    }

    /// Like [`MockBackend::start`], but every answer waits `delay` first.
    fn start_with_delay(routes: &[(&str, u16, &str)], delay: Duration) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let path = request.url().to_string();
                    requests.lock().unwrap().push(Recorded {
                        method: request.method().to_string(),
                        path: path.clone(),
                        body,
                    });

                    thread::sleep(delay);
                    let (status, body) = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
                    let resp = Response::from_data(body.into_bytes())
                        .with_status_code(status)
                        .with_header(
                            Header::from_bytes("Content-Type", "application/json").unwrap(),
                        );
                    let _ = request.respond(resp);
                }
            })
        };

        Self {
            base_url: format!("http://{addr}"),
            server,
            requests,
            handle: Some(handle),
        }
    }

    fn client(&self) -> BackendClient {
        client_for(&self.base_url)
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn client_for(base_url: &str) -> BackendClient {
    client_with_timeout(base_url, 2000)
}

fn client_with_timeout(base_url: &str, timeout_ms: u64) -> BackendClient {
    let mut cfg = PitwallConfig::default();
    cfg.backend.url = base_url.to_string();
    cfg.backend.timeout_ms = timeout_ms;
    cfg.logging.enabled = false;
    BackendClient::from_config(&cfg)
}

/// Base URL nothing listens on.
fn dead_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

const STANDINGS: &str = "/api/drivers/standings";
const CHAT: &str = "/api/pit-wall/chat";

const THREE_DRIVERS: &str = r#"[
    {"driver_id":"norris","name":"Lando Norris","team":"McLaren","position":2,"points":275,"number":"4"},
    {"driver_id":"piastri","name":"Oscar Piastri","team":"McLaren","position":1,"points":284,"number":"81"},
    {"driver_id":"verstappen","name":"Max Verstappen","team":"Red Bull Racing","position":3,"points":187,"number":"1"}
]"#;

fn driver_rows(rendered: &str) -> Vec<String> {
    strip_ansi(rendered)
        .lines()
        .filter(|l| l.trim_start().starts_with('P'))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[test]
fn standings_keep_backend_order() {
    let backend = MockBackend::start(&[(STANDINGS, 200, THREE_DRIVERS)]);
    let drivers = backend.client().fetch_standings().unwrap();

    let ids: Vec<&str> = drivers.iter().map(|d| d.driver_id.as_str()).collect();
    assert_eq!(ids, ["norris", "piastri", "verstappen"]);

    let rendered = render_driver_list(
        &Standings::Loaded(drivers),
        None,
        &TeamPalette::default(),
    );
    let rows = driver_rows(&rendered);
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains("Lando Norris"));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, STANDINGS);
}

#[test]
fn single_record_renders_one_row() {
    let backend = MockBackend::start(&[(
        STANDINGS,
        200,
        r#"[{"driver_id":"verstappen","name":"Max Verstappen","team":"Red Bull Racing","position":1,"points":300}]"#,
    )]);
    let standings = Standings::fetch(&backend.client());
    let rows = driver_rows(&render_driver_list(&standings, None, &TeamPalette::default()));

    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("P1"));
    assert!(rows[0].contains("Max Verstappen"));
    assert!(rows[0].contains("300"));
}

#[test]
fn teams_partition_fetched_drivers() {
    let backend = MockBackend::start(&[(STANDINGS, 200, THREE_DRIVERS)]);
    let drivers = backend.client().fetch_standings().unwrap();
    let teams = group_by_team(&drivers);

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].name, "McLaren");
    assert_eq!(teams[0].points(), 559.0);
    assert_eq!(teams[0].best_position(), Some(1));
    let total: usize = teams.iter().map(|t| t.drivers.len()).sum();
    assert_eq!(total, drivers.len());
}

#[test]
fn error_status_is_a_fetch_error() {
    let backend = MockBackend::start(&[(STANDINGS, 503, r#"{"detail":"upstream down"}"#)]);
    assert_eq!(
        backend.client().fetch_standings(),
        Err(FetchError::Status(503))
    );
    assert!(Standings::fetch(&backend.client()).is_loading());
}

#[test]
fn malformed_body_is_a_decode_error() {
    let backend = MockBackend::start(&[(STANDINGS, 200, r#"{"drivers":[]}"#)]);
    let err = backend.client().fetch_standings().unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
}

#[test]
fn unreachable_backend_leaves_standings_loading() {
    let client = client_for(&dead_backend_url());
    let err = client.fetch_standings().unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert!(Standings::fetch(&client).is_loading());
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[test]
fn chat_round_trip_appends_reply() {
    let backend = MockBackend::start(&[(
        CHAT,
        200,
        r#"{"response":"Verstappen leads by 20 points.","session_id":"ignored"}"#,
    )]);
    let mut panel = ChatPanel::mount(ChatContext::General);

    let outcome = panel.submit(&backend.client(), "Who is leading?");
    assert_eq!(outcome, SubmitOutcome::Answered);

    let transcript: Vec<(Role, &str)> = panel
        .messages()
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(
        transcript,
        [
            (Role::User, "Who is leading?"),
            (Role::Assistant, "Verstappen leads by 20 points."),
        ]
    );
    assert!(!panel.is_pending());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    let body = requests[0].json();
    assert_eq!(body["message"], "Who is leading?");
    assert_eq!(body["session_id"], panel.session_id());
    assert_eq!(body["context"], "General F1 analysis and strategy discussion");
    assert!(panel.session_id().starts_with("pitwall_"));
}

#[test]
fn driver_chat_sends_driver_context() {
    let backend = MockBackend::start(&[
        (
            STANDINGS,
            200,
            r#"[{"driver_id":"verstappen","name":"Max Verstappen","team":"Red Bull Racing","position":1,"points":300}]"#,
        ),
        (CHAT, 200, r#"{"response":"Strong in sector 1.","session_id":"x"}"#),
    ]);
    let client = backend.client();
    let standings = Standings::fetch(&client);
    let driver = standings.find_driver("verstappen").unwrap();

    let mut panel = ChatPanel::mount(ChatContext::for_driver(driver));
    panel.submit(&client, "How is his Spa pace?");

    let chat = backend
        .requests()
        .into_iter()
        .find(|r| r.path == CHAT)
        .unwrap();
    let body = chat.json();
    assert_eq!(body["context"], "Driver analysis for Max Verstappen (Red Bull Racing)");
    assert!(
        body["session_id"]
            .as_str()
            .unwrap()
            .starts_with("driver_verstappen_")
    );
}

#[test]
fn chat_error_status_appends_fallback() {
    let backend = MockBackend::start(&[(CHAT, 500, r#"{"detail":"model crashed"}"#)]);
    let mut panel = ChatPanel::mount(ChatContext::for_team("Ferrari"));

    assert_eq!(
        panel.submit(&backend.client(), "Tyre plan?"),
        SubmitOutcome::Fallback
    );
    assert_eq!(panel.messages().len(), 2);
    assert_eq!(panel.messages()[1].content, FALLBACK_REPLY);
}

#[test]
fn unreachable_chat_appends_fallback_and_clears_pending() {
    let client = client_for(&dead_backend_url());
    let mut panel = ChatPanel::mount(ChatContext::General);

    panel.submit(&client, "Anyone there?");
    let last = panel.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, FALLBACK_REPLY);
    assert!(!panel.is_pending());
    assert!(panel.can_submit("Try again"));
}

#[test]
fn blank_input_sends_nothing() {
    let backend = MockBackend::start(&[(CHAT, 200, r#"{"response":"hi","session_id":"x"}"#)]);
    let mut panel = ChatPanel::mount(ChatContext::General);

    assert_eq!(panel.submit(&backend.client(), "  \t "), SubmitOutcome::Ignored);
    assert!(panel.messages().is_empty());
    assert!(backend.requests().is_empty());
}

#[test]
fn context_is_omitted_when_absent() {
    let backend = MockBackend::start(&[(CHAT, 200, r#"{"response":"ok","session_id":"x"}"#)]);
    let reply = backend
        .client()
        .send_chat_message("hello", "pitwall_1_1", None)
        .unwrap();
    assert_eq!(reply, "ok");

    let body = backend.requests()[0].json();
    assert!(body.get("context").is_none());
    assert_eq!(body["session_id"], "pitwall_1_1");
}

#[test]
fn panels_get_distinct_sessions() {
    let a = ChatPanel::mount(ChatContext::General);
    let b = ChatPanel::mount(ChatContext::General);
    assert_ne!(a.session_id(), b.session_id());
}

// ---------------------------------------------------------------------------
// Health and races
// ---------------------------------------------------------------------------

#[test]
fn health_and_recent_races() {
    let backend = MockBackend::start(&[
        ("/api/health", 200, r#"{"status":"healthy"}"#),
        (
            "/api/races/recent",
            200,
            r#"[{"season":"2025","round":"13","race_name":"Belgian Grand Prix",
                 "circuit_name":"Circuit de Spa-Francorchamps","date":"2025-07-27",
                 "results":[{"position":"1","Driver":{"givenName":"Oscar","familyName":"Piastri"}}]}]"#,
        ),
    ]);
    let client = backend.client();

    assert_eq!(client.health().unwrap().status, "healthy");
    let races = client.recent_races().unwrap();
    assert_eq!(races.len(), 1);
    assert_eq!(races[0].winner().as_deref(), Some("Oscar Piastri"));
}

// ---------------------------------------------------------------------------
// Slow backend
// ---------------------------------------------------------------------------

const SLOW: Duration = Duration::from_millis(1500);

#[test]
fn slow_standings_count_as_transport_failure() {
    let backend = MockBackend::start_with_delay(&[(STANDINGS, 200, THREE_DRIVERS)], SLOW);
    let client = client_with_timeout(&backend.base_url, 300);

    let started = Instant::now();
    let err = client.fetch_standings().unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
    assert!(started.elapsed() < SLOW);

    assert!(Standings::fetch(&client).is_loading());
}

#[test]
fn slow_chat_reply_falls_back() {
    let backend =
        MockBackend::start_with_delay(&[(CHAT, 200, r#"{"response":"too late"}"#)], SLOW);
    let client = client_with_timeout(&backend.base_url, 300);

    let err = client
        .send_chat_message("Who wins at Spa?", "pitwall_1_1", None)
        .unwrap_err();
    assert!(matches!(err, ChatError::Transport(_)), "{err:?}");

    let mut panel = ChatPanel::mount(ChatContext::General);
    let outcome = panel.submit(&client, "Who wins at Spa?");
    assert_eq!(outcome, SubmitOutcome::Fallback);
    assert!(!panel.is_pending());
    let last = panel.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, FALLBACK_REPLY);
}
