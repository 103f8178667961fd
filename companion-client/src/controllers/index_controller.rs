//! Landing page: session gate, feature cards and sign-out.

use crate::controllers::Notification;

/// Client-side routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Auth,
    Devotional,
    Chat,
    Journal,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Auth => "/auth",
            Route::Devotional => "/devotional",
            Route::Chat => "/chat",
            Route::Journal => "/journal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    pub route: Route,
}

pub static FEATURE_CARDS: [FeatureCard; 3] = [
    FeatureCard {
        title: "Daily Devotional",
        description: "Generate personalized devotionals based on topics or Scripture passages",
        action: "Create Devotional",
        route: Route::Devotional,
    },
    FeatureCard {
        title: "Spiritual Chat",
        description: "Ask questions about faith, get biblical guidance, and explore spiritual topics",
        action: "Start Conversation",
        route: Route::Chat,
    },
    FeatureCard {
        title: "Faith Journal",
        description: "Reflect on your journey, receive prompts, and generate prayers from your entries",
        action: "Open Journal",
        route: Route::Journal,
    },
];

/// Signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_email: String,
}

/// Sessions are owned by the auth provider; this controller only reacts
/// to what it reports.
#[derive(Debug)]
pub struct IndexController {
    loading: bool,
    session: Option<Session>,
}

impl Default for IndexController {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexController {
    /// Starts in the loading state until the first session report arrives.
    pub fn new() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }

    /// Records an auth state change or the initial session lookup.
    pub fn on_session(&mut self, session: Option<Session>) {
        self.session = session;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Where to redirect, if anywhere: `/auth` once loading finished without a user.
    pub fn redirect(&self) -> Option<Route> {
        (!self.loading && self.session.is_none()).then_some(Route::Auth)
    }

    pub fn cards(&self) -> &'static [FeatureCard] {
        &FEATURE_CARDS
    }

    /// Clears the session and returns the redirect plus the toast to show.
    pub fn sign_out(&mut self) -> (Route, Notification) {
        self.session = None;
        (
            Route::Auth,
            Notification::info("Signed out successfully", "See you next time!"),
        )
    }
}
