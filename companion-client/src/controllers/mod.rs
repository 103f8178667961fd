//! Page controllers and the state they share.

pub mod chat_controller;
pub mod devotional_controller;
pub mod index_controller;
pub mod journal_controller;

/// Lifecycle of a controller's single request slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    /// A request is in flight; the primary action is disabled.
    Submitting,
    Success,
    /// The last request failed; a notification is pending.
    Error,
}

impl ControllerState {
    pub fn is_busy(self) -> bool {
        self == ControllerState::Submitting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// Toast-style message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Request slot and notification shared by every controller.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    pub(crate) state: ControllerState,
    pub(crate) notification: Option<Notification>,
}

impl Slot {
    /// Claims the slot; `false` when a request is already in flight.
    pub(crate) fn begin(&mut self) -> bool {
        if self.state.is_busy() {
            return false;
        }
        self.state = ControllerState::Submitting;
        self.notification = None;
        true
    }

    pub(crate) fn succeed(&mut self, notification: Option<Notification>) {
        self.state = ControllerState::Success;
        self.notification = notification;
    }

    /// Any failure is reported the same way, whatever its cause.
    pub(crate) fn fail(&mut self, description: &str) {
        self.state = ControllerState::Error;
        self.notification = Some(Notification::error("Error", description));
    }

    /// Rejects input without touching the request slot.
    pub(crate) fn warn(&mut self, title: &str, description: &str) {
        self.notification = Some(Notification::error(title, description));
    }

    pub(crate) fn dismiss(&mut self) {
        self.notification = None;
        if self.state == ControllerState::Error {
            self.state = ControllerState::Idle;
        }
    }
}
