pub mod devotional_request;
pub mod devotional_route;
