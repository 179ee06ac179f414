mod auth;
mod error_handler;

pub use auth::admin_auth;
pub use error_handler::log_errors;
