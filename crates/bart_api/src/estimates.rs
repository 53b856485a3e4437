//! Real-time departure estimates (`/etd.aspx`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{Configured, facade};
use crate::error::BartError;
use crate::models::ResponseMetadata;
use crate::request::ApiRequest;
use crate::{scalar, station};

const PATH: &str = "/etd.aspx";

/// Parameters of an estimates request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateParams {
    /// Station abbreviation or `all`
    pub orig: String,
    /// Platform number (1-4); empty or `None` for every platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plat: Option<String>,
    /// Direction, `n` or `s`; empty or `None` for both
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl EstimateParams {
    /// Estimates for every platform and direction at `orig`
    #[must_use]
    pub fn new(orig: impl Into<String>) -> Self {
        Self {
            orig: orig.into(),
            plat: None,
            dir: None,
        }
    }

    /// Restrict to one platform
    #[must_use]
    pub fn with_platform(mut self, plat: impl Into<String>) -> Self {
        self.plat = Some(plat.into());
        self
    }

    /// Restrict to one direction
    #[must_use]
    pub fn with_direction(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn to_request(&self) -> Result<ApiRequest, BartError> {
        etd_request(&self.orig, self.plat.as_deref(), self.dir.as_deref())
    }
}

fn etd_request(orig: &str, plat: Option<&str>, dir: Option<&str>) -> Result<ApiRequest, BartError> {
    let orig = station::validate_or_all(orig)?;
    Ok(ApiRequest::new(PATH, "etd")
        .with("orig", orig)
        .with_optional("plat", plat)
        .with_optional("dir", dir))
}

/// A single predicted train
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Minutes until departure; `0` when the train is leaving
    #[serde(deserialize_with = "scalar::minutes")]
    pub minutes: u32,

    #[serde(deserialize_with = "scalar::number")]
    pub platform: u32,

    /// `North` or `South`
    #[serde(default)]
    pub direction: String,

    /// Number of cars
    #[serde(deserialize_with = "scalar::number")]
    pub length: u32,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub hexcolor: String,

    /// Bikes allowed on the train
    #[serde(default, deserialize_with = "scalar::flag")]
    pub bikeflag: bool,

    /// Delay in seconds
    #[serde(default, deserialize_with = "scalar::number")]
    pub delay: u32,

    #[serde(default, deserialize_with = "scalar::flag")]
    pub cancelflag: bool,

    #[serde(default, deserialize_with = "scalar::flag")]
    pub dynamicflag: bool,
}

impl Estimate {
    /// Whether the train is at the platform about to leave
    #[must_use]
    pub const fn is_leaving(&self) -> bool {
        self.minutes == 0
    }
}

/// Trains heading to one destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub destination: String,

    /// Destination abbreviation
    pub abbreviation: String,

    #[serde(default, deserialize_with = "scalar::flag")]
    pub limited: bool,

    #[serde(rename = "estimate", default, deserialize_with = "scalar::one_or_many")]
    pub estimates: Vec<Estimate>,
}

/// Departures from one station
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationEstimates {
    pub name: String,
    pub abbr: String,

    #[serde(rename = "etd", default, deserialize_with = "scalar::one_or_many")]
    pub departures: Vec<Departure>,
}

/// Response of `cmd=etd`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,

    #[serde(rename = "station", default, deserialize_with = "scalar::one_or_many")]
    pub stations: Vec<StationEstimates>,
}

/// Real-time estimate operations
#[async_trait]
pub trait Estimates: Configured {
    /// Departures from `orig` (abbreviation or `all`), optionally narrowed to
    /// a platform and a direction. Empty values are not sent.
    ///
    /// # Errors
    ///
    /// Returns [`BartError::InvalidStation`] before any request is made if
    /// `orig` is not a station abbreviation or `all`.
    async fn request_etd(
        &self,
        orig: &str,
        plat: Option<&str>,
        dir: Option<&str>,
    ) -> Result<EstimatesResponse, BartError> {
        let request = etd_request(orig, plat, dir)?;
        self.transport().fetch(&request).await
    }

    /// Same as [`Estimates::request_etd`], taking the parameters as a record
    async fn request_estimate(
        &self,
        params: &EstimateParams,
    ) -> Result<EstimatesResponse, BartError> {
        let request = params.to_request()?;
        self.transport().fetch(&request).await
    }
}

facade! {
    /// Estimates endpoint on its own
    EstimatesApi => Estimates
}
