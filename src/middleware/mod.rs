mod auth;
mod client;
mod error_handler;
mod rate_limit;

pub use auth::{attempt_login, require_login};
pub use client::{Client, client_ip};
pub use error_handler::log_errors;
pub use rate_limit::LoginLimiter;
