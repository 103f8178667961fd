//! Headless page controllers for the faith companion frontend.
//!
//! Each controller owns its input state, talks to one proxy endpoint through
//! [`CompanionApi`] and exposes what the page should render. A controller
//! never has more than one request in flight.

pub mod api_client;
pub mod controllers;
pub mod error;

pub use api_client::{CompanionApi, HttpCompanionApi};
pub use controllers::{
    ControllerState, Notification, NotificationKind, chat_controller::ChatController,
    devotional_controller::DevotionalController, index_controller::IndexController,
    journal_controller::JournalController,
};
pub use error::ClientError;
