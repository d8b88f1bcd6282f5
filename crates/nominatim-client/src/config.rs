use std::env;
use std::time::Duration;

use tracing::warn;

use crate::request::NominatimOptions;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "nominatim-client-rs/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Nominatim server URL, without the endpoint path
    pub base_url: String,
    /// Contact address sent with every request, as the usage policy asks
    pub email: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Defaults merged into search requests
    pub defaults: NominatimOptions,
}

impl ClientConfig {
    /// Configuration for the public Nominatim server
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: email.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            defaults: NominatimOptions::default(),
        }
    }

    /// Parse configuration from environment variables.
    ///
    /// See [`ClientConfig::from_lookup`] for the variables and fallbacks.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// Reads `NOMINATIM_EMAIL`, `NOMINATIM_BASE_URL`, `NOMINATIM_USER_AGENT`
    /// and `NOMINATIM_TIMEOUT_SECS`. Missing variables fall back to the
    /// public server defaults, as does a timeout that is not a whole number
    /// of seconds. A missing email is left empty and sent as `email=`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup("NOMINATIM_EMAIL").unwrap_or_default();
        if email.is_empty() {
            warn!("NOMINATIM_EMAIL is not set; requests carry an empty contact address");
        }

        let base_url =
            lookup("NOMINATIM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let user_agent =
            lookup("NOMINATIM_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let timeout = lookup("NOMINATIM_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            base_url,
            email,
            user_agent,
            timeout,
            defaults: NominatimOptions::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_defaults(mut self, defaults: NominatimOptions) -> Self {
        self.defaults = defaults;
        self
    }
}
