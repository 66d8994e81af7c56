//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables. Every struct
//! exposes `from_env()` and falls back to development defaults when a
//! variable is missing or unparsable.
//!
//! - [`cors`]: allowed browser origins
//! - [`email`]: SMTP settings for notification mail
//! - [`jwt`]: admin session token settings
//! - [`rate_limit`]: per-IP request limits
//! - [`server`]: listen ports
//! - [`storage`]: upload directory, public URL and size ceiling
//!
//! ```ignore
//! use schoolhub_config::{JwtConfig, StorageConfig};
//!
//! let jwt = JwtConfig::from_env();
//! let storage = StorageConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod rate_limit;
pub mod server;
pub mod storage;

pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
