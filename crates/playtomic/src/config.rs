//! Client configuration.
//!
//! Configuration is passed explicitly to [`PlaytomicClient::with_config`]
//! (or [`AuthSession::new`]); the library never touches process-wide state
//! such as a global log level.
//!
//! [`PlaytomicClient::with_config`]: crate::PlaytomicClient::with_config
//! [`AuthSession::new`]: crate::AuthSession::new

use std::time::Duration;

use crate::types::BaseUrl;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("playtomic-rs/", env!("CARGO_PKG_VERSION"));

/// Settings for a client and its transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; every request path is joined onto it.
    pub base_url: BaseUrl,
    pub user_agent: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// Log response bodies at trace level.
    pub log_bodies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            log_bodies: false,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_log_bodies(mut self, log_bodies: bool) -> Self {
        self.log_bodies = log_bodies;
        self
    }
}
