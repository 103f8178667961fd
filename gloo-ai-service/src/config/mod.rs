pub mod credentials;
pub mod gloo_config;
