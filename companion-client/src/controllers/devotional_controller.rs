//! Devotional page: topic / verse inputs and the generated devotional.

use tracing::error;

use crate::{
    api_client::{CompanionApi, DevotionalReply, DevotionalRequest},
    controllers::{ControllerState, Notification, Slot},
    error::ClientError,
};

#[derive(Debug, Default)]
pub struct DevotionalController {
    slot: Slot,
    topic: String,
    verse_reference: String,
    devotional: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl DevotionalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_verse_reference(&mut self, verse: impl Into<String>) {
        self.verse_reference = verse.into();
    }

    /// Last generated devotional; `None` also when the reply had no text.
    pub fn devotional(&self) -> Option<&str> {
        self.devotional.as_deref()
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

    pub fn can_generate(&self) -> bool {
        !self.slot.state.is_busy()
    }

    /// Starts a generation; needs a topic or a verse reference.
    pub fn begin_generate(&mut self) -> Option<DevotionalRequest> {
        if self.slot.state.is_busy() {
            return None;
        }
        if self.topic.is_empty() && self.verse_reference.is_empty() {
            self.slot
                .warn("Input required", "Please enter a topic or verse reference");
            return None;
        }
        self.slot.begin();
        Some(DevotionalRequest {
            topic: non_empty(&self.topic),
            verse_reference: non_empty(&self.verse_reference),
        })
    }

    pub fn complete_generate(&mut self, outcome: Result<DevotionalReply, ClientError>) {
        match outcome {
            Ok(reply) => {
                self.devotional = reply.devotional;
                self.slot.succeed(Some(Notification::info(
                    "Devotional generated!",
                    "Your personalized devotional is ready",
                )));
            }
            Err(e) => {
                error!(error = %e, "error generating devotional");
                self.slot
                    .fail("Failed to generate devotional. Please try again.");
            }
        }
    }

    pub async fn generate<A>(&mut self, api: &A) -> bool
    where
        A: CompanionApi + ?Sized,
    {
        let Some(req) = self.begin_generate() else {
            return false;
        };
        let outcome = api.devotional(req).await;
        self.complete_generate(outcome);
        true
    }
}
