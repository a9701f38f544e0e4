// src/services/chat_session.rs
use std::{fmt::Debug, sync::Arc};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::services::relay_client::Relay;

pub const GREETING: &str = "Hi! I'm Ava, your AI assistant. How can I help you today?";

/// Shown when the relay answers 2xx without a `reply`.
pub const NO_REPLY_FALLBACK: &str = "No response from webhook.";

/// Shown for any failed exchange: unreachable relay, timeout, non-2xx, bad JSON.
pub const CONNECTION_ERROR: &str = "Sorry, there was a problem connecting to the server.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One turn of the conversation. Never mutated once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug)]
struct Transcript {
    messages: Vec<ChatMessage>,
    pending_input: String,
    next_id: u64,
    open: bool,
}

impl Transcript {
    fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            pending_input: String::new(),
            next_id: 0,
            open: false,
        };
        transcript.append(Sender::Bot, GREETING);
        transcript
    }

    // Ids come from this counter only, under the same write lock as the push.
    fn append(&mut self, sender: Sender, text: impl Into<String>) -> ChatMessage {
        let msg = ChatMessage {
            id: self.next_id,
            sender,
            text: text.into(),
        };
        self.next_id += 1;
        self.messages.push(msg.clone());
        msg
    }
}

/// Client-side state of the chat widget for one page view.
///
/// Overlapping [`submit`](Self::submit) calls are not queued: each one runs its
/// own relay exchange and the bot turns land in the order the replies
/// resolve.
pub struct ChatSession<R> {
    inner: Arc<RwLock<Transcript>>,
    relay: Arc<R>,
}

impl<R> Clone for ChatSession<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            relay: Arc::clone(&self.relay),
        }
    }
}

impl<R> Debug for ChatSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession").finish_non_exhaustive()
    }
}

impl<R: Relay> ChatSession<R> {
    /// Start a session seeded with the bot greeting.
    pub fn new(relay: R) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Transcript::new())),
            relay: Arc::new(relay),
        }
    }

    /// Send `text` as a user turn and wait for the bot turn that answers it.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the user turn is
    /// appended before the relay is contacted, and exactly one bot turn is
    /// appended afterwards whatever the outcome; that bot turn is returned.
    pub async fn submit(&self, text: impl Into<String>) -> Option<ChatMessage> {
        let text = text.into();
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank chat input");
            return None;
        }
        {
            let mut guard = self.inner.write().await;
            guard.append(Sender::User, text.as_str());
            guard.pending_input.clear();
        }
        Some(self.exchange(&text).await)
    }

    /// Submit whatever is in the compose box (send button or Enter).
    pub async fn submit_pending(&self) -> Option<ChatMessage> {
        let text = {
            let mut guard = self.inner.write().await;
            if guard.pending_input.trim().is_empty() {
                return None;
            }
            let text = std::mem::take(&mut guard.pending_input);
            guard.append(Sender::User, text.as_str());
            text
        };
        Some(self.exchange(&text).await)
    }

    async fn exchange(&self, text: &str) -> ChatMessage {
        // No lock is held across the call so other submits can proceed.
        let reply = match self.relay.send(text).await {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                tracing::warn!("relay reply carried no text, using fallback");
                NO_REPLY_FALLBACK.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "relay exchange failed");
                CONNECTION_ERROR.to_string()
            }
        };

        let mut guard = self.inner.write().await;
        guard.append(Sender::Bot, reply)
    }

    pub async fn set_pending_input(&self, text: impl Into<String>) {
        self.inner.write().await.pending_input = text.into();
    }

    pub async fn pending_input(&self) -> String {
        self.inner.read().await.pending_input.clone()
    }

    /// Snapshot of the transcript for rendering.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.inner.read().await.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    pub async fn open(&self) {
        self.inner.write().await.open = true;
    }

    /// Hide the widget. The transcript is kept for the next `open`.
    pub async fn close(&self) {
        self.inner.write().await.open = false;
    }

    pub async fn toggle(&self) -> bool {
        let mut guard = self.inner.write().await;
        guard.open = !guard.open;
        guard.open
    }

    pub async fn is_open(&self) -> bool {
        self.inner.read().await.open
    }
}
