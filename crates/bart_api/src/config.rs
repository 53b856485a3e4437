//! Client configuration

use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BartError;
use crate::transport::{self, HttpExecutor, ReqwestExecutor};

/// Public API key BART hands out to every developer. Register your own key
/// and pass it through [`BartConfig::key`] if you have one.
pub const DEFAULT_KEY: &str = "MW9S-E7SL-26DU-VV8V";

/// Production origin of the BART API
pub const BASE_URL: &str = "https://api.bart.gov/api";

/// Caller-facing configuration for a BART client
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BartConfig {
    /// API key. Empty means [`DEFAULT_KEY`].
    #[serde(default)]
    pub key: String,

    /// Request timeout in seconds for the stock HTTP executor. Ignored when
    /// `http` is set; `None` leaves reqwest's default (no timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// HTTP executor. `None` means a stock reqwest-backed executor.
    #[serde(skip)]
    pub http: Option<Arc<dyn HttpExecutor>>,
}

impl fmt::Debug for BartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BartConfig")
            .field("key", &self.key)
            .field("timeout_secs", &self.timeout_secs)
            .field("http", &self.http.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl BartConfig {
    /// Configuration with a registered API key and everything else default
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.key.chars().any(char::is_whitespace) {
            return Err("key must not contain whitespace".to_string());
        }

        Ok(())
    }
}

/// Fully resolved configuration shared by a client and its façades
#[derive(Clone)]
pub(crate) struct ClientConfig {
    pub(crate) key: String,
    pub(crate) base_url: String,
    pub(crate) http: Arc<dyn HttpExecutor>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key", &self.key)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Process-wide configuration used by clients built without one
static DEFAULT_CONFIG: LazyLock<Arc<ClientConfig>> = LazyLock::new(|| {
    Arc::new(ClientConfig {
        key: DEFAULT_KEY.to_string(),
        base_url: BASE_URL.to_string(),
        http: transport::stock_executor(),
    })
});

impl ClientConfig {
    /// Fill in defaults for anything the caller left unset.
    ///
    /// The base URL is always the production origin here.
    pub(crate) fn resolve(config: Option<BartConfig>) -> Result<Self, BartError> {
        let config = config.unwrap_or_default();
        config.validate().map_err(BartError::ConfigurationError)?;

        let key = if config.key.is_empty() {
            DEFAULT_KEY.to_string()
        } else {
            config.key
        };

        let http: Arc<dyn HttpExecutor> = match config.http {
            Some(http) => http,
            None => Arc::new(ReqwestExecutor::new(
                config.timeout_secs.map(Duration::from_secs),
            )?),
        };

        Ok(Self {
            key,
            base_url: BASE_URL.to_string(),
            http,
        })
    }

    /// Shared handle to the process-wide default configuration
    pub(crate) fn shared_default() -> Arc<Self> {
        Arc::clone(&DEFAULT_CONFIG)
    }
}
