/// Pit wall chat panel: transcript state and the submit cycle.
///
/// A [`ChatPanel`] is created when a chat surface mounts. It owns the
/// surface's session id and an append-only transcript. Submitting goes
/// through three steps:
///
/// 1. [`ChatPanel::begin_submit`] appends the user message and marks the
///    panel pending. Blank input or a second submit while pending is
///    refused without touching the transcript.
/// 2. The caller hands the returned [`PendingReply`] to the backend.
/// 3. [`ChatPanel::complete`] appends the reply, or the fixed fallback on
///    failure, and clears the pending flag.
///
/// [`ChatPanel::submit`] runs all three against a [`ChatBackend`] in one
/// call. The split exists for surfaces that deliver replies later: a reply
/// that arrives after [`ChatPanel::unmount`], or one that does not belong to
/// the outstanding request, is dropped.
pub mod context;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ChatBackend, ChatError};
use crate::session::new_session_id;

pub use context::{ChatContext, SAMPLE_QUESTIONS, sample_question};

/// Assistant message appended when the backend cannot be reached.
pub const FALLBACK_REPLY: &str = "Unable to connect to pit wall. Please try again.";

static PANEL_IDS: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// What a submit did to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, a request already pending, or an unmounted panel.
    /// Nothing was sent and the transcript is unchanged.
    Ignored,
    /// The assistant's reply was appended.
    Answered,
    /// The backend failed; [`FALLBACK_REPLY`] was appended.
    Fallback,
    /// A reply arrived for a request this panel no longer waits on.
    Discarded,
}

/// Ticket for the one request a panel has outstanding.
#[derive(Debug)]
pub struct PendingReply {
    panel: u64,
    generation: u64,
    message: String,
}

impl PendingReply {
    /// The user text to send.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Chat state of one mounted surface.
#[derive(Debug)]
pub struct ChatPanel {
    id: u64,
    session_id: String,
    context: ChatContext,
    messages: Vec<ChatMessage>,
    pending: Option<u64>,
    generation: u64,
    mounted: bool,
}

impl ChatPanel {
    /// Mount a panel for a surface, minting its session id.
    pub fn mount(context: ChatContext) -> Self {
        Self {
            id: PANEL_IDS.fetch_add(1, Ordering::Relaxed),
            session_id: new_session_id(&context.scope()),
            context,
            messages: Vec::new(),
            pending: None,
            generation: 0,
            mounted: true,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// `true` while a request is outstanding; input stays disabled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether `text` would be sent right now.
    pub fn can_submit(&self, text: &str) -> bool {
        self.mounted && self.pending.is_none() && !text.trim().is_empty()
    }

    /// Append the user message and reserve the single request slot.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingReply> {
        if !self.can_submit(text) {
            return None;
        }

        self.generation += 1;
        self.pending = Some(self.generation);
        self.messages.push(ChatMessage::user(text));

        Some(PendingReply {
            panel: self.id,
            generation: self.generation,
            message: text.to_string(),
        })
    }

    /// Apply the backend's answer to the outstanding request.
    pub fn complete(
        &mut self,
        pending: PendingReply,
        result: Result<String, ChatError>,
    ) -> SubmitOutcome {
        if !self.mounted
            || pending.panel != self.id
            || self.pending != Some(pending.generation)
        {
            return SubmitOutcome::Discarded;
        }

        self.pending = None;
        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply));
                SubmitOutcome::Answered
            }
            Err(_) => {
                self.messages.push(ChatMessage::assistant(FALLBACK_REPLY));
                SubmitOutcome::Fallback
            }
        }
    }

    /// Send `text` and wait for the reply.
    pub fn submit(&mut self, backend: &impl ChatBackend, text: &str) -> SubmitOutcome {
        let Some(pending) = self.begin_submit(text) else {
            return SubmitOutcome::Ignored;
        };

        let context = self.context.describe();
        let result = backend.send_chat_message(pending.message(), &self.session_id, Some(&context));
        self.complete(pending, result)
    }

    /// Tear the surface down. Later replies are discarded and no new
    /// submits are accepted.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pending = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
