pub mod chat;
pub mod devotional;
pub mod health_route;
pub mod journal;
pub mod preflight_route;
