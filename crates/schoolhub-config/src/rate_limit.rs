//! Per-IP rate limits.
//!
//! Three buckets, each a token bucket keyed by client IP (honouring
//! `X-Forwarded-For` / `X-Real-IP` when the API sits behind a proxy):
//!
//! - general: every public read endpoint
//! - auth: admin login
//! - forms: contact messages and enrollment submissions
//!
//! | Variable | Default |
//! |---|---|
//! | `RATE_LIMIT_GENERAL_PER_SECOND` | 2 |
//! | `RATE_LIMIT_GENERAL_BURST_SIZE` | 60 |
//! | `RATE_LIMIT_AUTH_PER_SECOND` | 10 |
//! | `RATE_LIMIT_AUTH_BURST_SIZE` | 5 |
//! | `RATE_LIMIT_FORMS_PER_SECOND` | 30 |
//! | `RATE_LIMIT_FORMS_BURST_SIZE` | 3 |
//!
//! `*_PER_SECOND` is the replenish period: one token returns every N seconds.

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::env_or;

pub type IpGovernorConfig =
    GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub general_per_second: u64,
    pub general_burst_size: u32,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
    pub forms_per_second: u64,
    pub forms_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 60,
            auth_per_second: 10,
            auth_burst_size: 5,
            forms_per_second: 30,
            forms_burst_size: 3,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_per_second: env_or("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_or("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
            forms_per_second: env_or("RATE_LIMIT_FORMS_PER_SECOND", defaults.forms_per_second),
            forms_burst_size: env_or("RATE_LIMIT_FORMS_BURST_SIZE", defaults.forms_burst_size),
        }
    }

    /// Limits generous enough that tests never trip them.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            general_per_second: 1,
            general_burst_size: 10_000,
            auth_per_second: 1,
            auth_burst_size: 10_000,
            forms_per_second: 1,
            forms_burst_size: 10_000,
        }
    }

    /// # Panics
    ///
    /// Panics if the period or burst size is zero.
    #[must_use]
    pub fn general_governor_config(&self) -> IpGovernorConfig {
        build(self.general_per_second, self.general_burst_size, "general")
    }

    /// # Panics
    ///
    /// Panics if the period or burst size is zero.
    #[must_use]
    pub fn auth_governor_config(&self) -> IpGovernorConfig {
        build(self.auth_per_second, self.auth_burst_size, "auth")
    }

    /// # Panics
    ///
    /// Panics if the period or burst size is zero.
    #[must_use]
    pub fn forms_governor_config(&self) -> IpGovernorConfig {
        build(self.forms_per_second, self.forms_burst_size, "forms")
    }
}

fn build(per_second: u64, burst_size: u32, name: &str) -> IpGovernorConfig {
    GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .unwrap_or_else(|| panic!("Failed to build {} rate limiter config", name))
}
