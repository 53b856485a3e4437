//! Client composition
//!
//! [`BartClient`] implements every façade trait over one shared
//! configuration. The façade structs (`AdvisoriesApi`, `EstimatesApi`, ...)
//! implement a single trait each and can be built on their own.

use std::sync::Arc;

use crate::advisories::{Advisories, AdvisoriesApi};
use crate::config::{BartConfig, ClientConfig};
use crate::error::BartError;
use crate::estimates::{Estimates, EstimatesApi};
use crate::routes::{Routes, RoutesApi};
use crate::schedules::{Schedules, SchedulesApi};
use crate::stations::{Stations, StationsApi};
use crate::transport::Transport;

/// Access to the request pipeline behind a client or façade.
///
/// This trait is not re-exported, so only this crate can implement it and,
/// through it, the façade traits.
pub trait Configured: Send + Sync {
    #[doc(hidden)]
    fn transport(&self) -> &Transport;
}

/// Declare a façade struct bound to one façade trait
macro_rules! facade {
    ($(#[$meta:meta])* $name:ident => $api:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            transport: $crate::transport::Transport,
        }

        impl $name {
            /// Build the façade from a configuration; `None` uses the
            /// process-wide defaults.
            ///
            /// # Errors
            ///
            /// Returns [`BartError::ConfigurationError`](crate::BartError) if
            /// the configuration is invalid or the HTTP client cannot be built.
            pub fn new(
                config: Option<$crate::config::BartConfig>,
            ) -> Result<Self, $crate::error::BartError> {
                let config = $crate::config::ClientConfig::resolve(config)?;
                Ok(Self::from_transport($crate::transport::Transport::new(
                    std::sync::Arc::new(config),
                )))
            }

            pub(crate) const fn from_transport(transport: $crate::transport::Transport) -> Self {
                Self { transport }
            }

            #[doc(hidden)]
            #[must_use]
            pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
                Self::from_transport(self.transport.with_base_url(base_url.into()))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::from_transport($crate::transport::Transport::new(
                    $crate::config::ClientConfig::shared_default(),
                ))
            }
        }

        impl $crate::client::Configured for $name {
            fn transport(&self) -> &$crate::transport::Transport {
                &self.transport
            }
        }

        impl $api for $name {}
    };
}

pub(crate) use facade;

/// Client for every BART API endpoint
///
/// Cheap to clone; clones share the resolved configuration.
///
/// ```no_run
/// use bart_api::{BartClient, Estimates};
///
/// # async fn run() -> Result<(), bart_api::BartError> {
/// let client = BartClient::default();
/// let departures = client.request_etd("MCAR", None, Some("s")).await?;
/// for station in &departures.stations {
///     println!("{}: {} destinations", station.name, station.departures.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BartClient {
    transport: Transport,
}

impl BartClient {
    /// Build a client from a configuration; `None` uses the process-wide
    /// defaults (public key, stock executor).
    ///
    /// # Errors
    ///
    /// Returns [`BartError::ConfigurationError`] if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: Option<BartConfig>) -> Result<Self, BartError> {
        let config = ClientConfig::resolve(config)?;
        Ok(Self {
            transport: Transport::new(Arc::new(config)),
        })
    }

    #[doc(hidden)]
    #[must_use]
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            transport: self.transport.with_base_url(base_url.into()),
        }
    }

    /// API key requests are signed with
    #[must_use]
    pub fn key(&self) -> &str {
        &self.transport.config().key
    }

    /// Origin requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.transport.config().base_url
    }

    /// Advisories façade sharing this client's configuration
    #[must_use]
    pub fn advisories(&self) -> AdvisoriesApi {
        AdvisoriesApi::from_transport(self.transport.clone())
    }

    /// Estimates façade sharing this client's configuration
    #[must_use]
    pub fn estimates(&self) -> EstimatesApi {
        EstimatesApi::from_transport(self.transport.clone())
    }

    /// Routes façade sharing this client's configuration
    #[must_use]
    pub fn routes(&self) -> RoutesApi {
        RoutesApi::from_transport(self.transport.clone())
    }

    /// Schedules façade sharing this client's configuration
    #[must_use]
    pub fn schedules(&self) -> SchedulesApi {
        SchedulesApi::from_transport(self.transport.clone())
    }

    /// Stations façade sharing this client's configuration
    #[must_use]
    pub fn stations(&self) -> StationsApi {
        StationsApi::from_transport(self.transport.clone())
    }
}

impl Default for BartClient {
    fn default() -> Self {
        Self {
            transport: Transport::new(ClientConfig::shared_default()),
        }
    }
}

impl Configured for BartClient {
    fn transport(&self) -> &Transport {
        &self.transport
    }
}

impl Advisories for BartClient {}
impl Estimates for BartClient {}
impl Routes for BartClient {}
impl Schedules for BartClient {}
impl Stations for BartClient {}
