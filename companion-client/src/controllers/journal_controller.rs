//! Journal page: entry text and reflect / prompt / prayer actions.

use tracing::error;

use crate::{
    api_client::{CompanionApi, JournalAction, JournalReply, JournalRequest},
    controllers::{ControllerState, Notification, Slot},
    error::ClientError,
};

#[derive(Debug, Default)]
pub struct JournalController {
    slot: Slot,
    entry: String,
    result: Option<String>,
    pending: Option<JournalAction>,
}

impl JournalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_entry(&mut self, text: impl Into<String>) {
        self.entry = text.into();
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
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

    /// Whether the button for `action` is enabled.
    pub fn can_run(&self, action: JournalAction) -> bool {
        !self.slot.state.is_busy() && (!action.requires_entry() || !self.entry.trim().is_empty())
    }

    pub fn begin_action(&mut self, action: JournalAction) -> Option<JournalRequest> {
        if self.slot.state.is_busy() {
            return None;
        }
        let entry = self.entry.trim();
        if action.requires_entry() && entry.is_empty() {
            self.slot
                .warn("Entry required", "Please write something in your journal first");
            return None;
        }
        let journal_entry = (!entry.is_empty()).then(|| entry.to_string());
        self.slot.begin();
        self.pending = Some(action);
        Some(JournalRequest {
            action,
            journal_entry,
            prompt: None,
        })
    }

    pub fn complete_action(&mut self, outcome: Result<JournalReply, ClientError>) {
        let action = self.pending.take();
        match outcome {
            Ok(reply) => {
                self.result = reply.result;
                let title = match action {
                    Some(a) => format!("{} generated!", a.label()),
                    None => "Generated!".to_string(),
                };
                self.slot.succeed(Some(Notification::info(
                    title,
                    "Your spiritual guidance is ready",
                )));
            }
            Err(e) => {
                error!(error = %e, "error processing journal");
                self.slot
                    .fail("Failed to process request. Please try again.");
            }
        }
    }

    pub async fn run<A>(&mut self, api: &A, action: JournalAction) -> bool
    where
        A: CompanionApi + ?Sized,
    {
        let Some(req) = self.begin_action(action) else {
            return false;
        };
        let outcome = api.journal(req).await;
        self.complete_action(outcome);
        true
    }
}
