//! Chat page: transcript, conversation handle and follow-up suggestions.

use tracing::{error, warn};

use crate::{
    api_client::{ChatReply, ChatRequest, CompanionApi},
    controllers::{ControllerState, Notification, Slot},
    error::ClientError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct ChatController {
    slot: Slot,
    input: String,
    transcript: Vec<ChatTurn>,
    chat_id: Option<String>,
    suggestions: Vec<String>,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn state(&self) -> ControllerState {
        self.slot.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.slot.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.slot.dismiss();
    }

    /// Whether the send button is enabled.
    pub fn can_send(&self) -> bool {
        !self.slot.state.is_busy() && !self.input.trim().is_empty()
    }

    /// Starts a send of `query`, or of the input box when `None`.
    ///
    /// Appends the user turn, clears the input and the suggestions, and
    /// returns the request to issue. `None` while a send is in flight or
    /// when the text is blank.
    pub fn begin_send(&mut self, query: Option<&str>) -> Option<ChatRequest> {
        let text = query.unwrap_or(self.input.as_str()).to_string();
        if text.trim().is_empty() || !self.slot.begin() {
            return None;
        }

        self.transcript.push(ChatTurn {
            role: Role::User,
            content: text.clone(),
        });
        self.input.clear();
        self.suggestions.clear();

        Some(ChatRequest {
            query: text,
            chat_id: self.chat_id.clone(),
        })
    }

    /// Applies the outcome of the request returned by [`Self::begin_send`].
    pub fn complete_send(&mut self, outcome: Result<ChatReply, ClientError>) {
        match outcome {
            Ok(reply) => {
                match reply.message {
                    Some(content) => self.transcript.push(ChatTurn {
                        role: Role::Assistant,
                        content,
                    }),
                    None => warn!("chat reply had no message"),
                }
                if self.chat_id.is_none() {
                    self.chat_id = reply.chat_id;
                }
                if !reply.suggestions.is_empty() {
                    self.suggestions = reply.suggestions;
                }
                self.slot.succeed(None);
            }
            Err(e) => {
                error!(error = %e, "error sending message");
                self.slot.fail("Failed to send message. Please try again.");
            }
        }
    }

    /// Sends the current input. Returns `false` if nothing was sent.
    pub async fn send<A>(&mut self, api: &A) -> bool
    where
        A: CompanionApi + ?Sized,
    {
        self.send_text(api, None).await
    }

    /// Sends the suggestion at `index` as the next user turn.
    pub async fn send_suggestion<A>(&mut self, api: &A, index: usize) -> bool
    where
        A: CompanionApi + ?Sized,
    {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return false;
        };
        self.send_text(api, Some(&suggestion)).await
    }

    async fn send_text<A>(&mut self, api: &A, query: Option<&str>) -> bool
    where
        A: CompanionApi + ?Sized,
    {
        let Some(req) = self.begin_send(query) else {
            return false;
        };
        let outcome = api.chat(req).await;
        self.complete_send(outcome);
        true
    }
}
