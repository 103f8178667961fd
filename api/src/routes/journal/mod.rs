pub mod journal_request;
pub mod journal_route;
