//! Service advisories (`/bsa.aspx`)
//!
//! Delays, elevator outages and the number of trains in service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{Configured, facade};
use crate::error::BartError;
use crate::models::ResponseMetadata;
use crate::request::ApiRequest;
use crate::scalar;

const PATH: &str = "/bsa.aspx";

/// One advisory as published by the agency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Advisory id; absent on the "no delays" placeholder
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Affected station, `BART` for system-wide notices
    #[serde(default)]
    pub station: String,

    /// Advisory type, e.g. `DELAY` or `ELEVATOR`
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Full advisory text
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub description: String,

    /// Shortened text for SMS
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub sms_text: String,

    #[serde(default)]
    pub posted: String,

    #[serde(default)]
    pub expires: String,
}

/// Response of `cmd=bsa`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisoriesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,

    #[serde(rename = "bsa", default, deserialize_with = "scalar::one_or_many")]
    pub advisories: Vec<Advisory>,
}

/// Response of `cmd=elev`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevatorResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,

    /// Elevator outages, in the same shape as advisories
    #[serde(rename = "bsa", default, deserialize_with = "scalar::one_or_many")]
    pub elevators: Vec<Advisory>,
}

/// Response of `cmd=count`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrainCount")]
pub struct TrainCountResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,

    /// Trains currently in service
    #[serde(rename = "traincount")]
    pub count: u32,
}

#[derive(Deserialize)]
struct Count(#[serde(deserialize_with = "scalar::number")] u32);

#[derive(Deserialize)]
struct RawTrainCountData {
    #[serde(default, alias = "TrainCount", alias = "trainCount")]
    traincount: Option<Count>,
}

/// The count sits directly under `root` on the live service and under
/// `root.data` in the wrapped form.
#[derive(Deserialize)]
struct RawTrainCount {
    #[serde(flatten)]
    meta: ResponseMetadata,

    #[serde(default, alias = "TrainCount", alias = "trainCount")]
    traincount: Option<Count>,

    #[serde(default)]
    data: Option<RawTrainCountData>,
}

impl TryFrom<RawTrainCount> for TrainCountResponse {
    type Error = String;

    fn try_from(raw: RawTrainCount) -> Result<Self, Self::Error> {
        let count = raw
            .traincount
            .or_else(|| raw.data.and_then(|data| data.traincount))
            .ok_or_else(|| "missing field `traincount`".to_string())?;
        Ok(Self {
            meta: raw.meta,
            count: count.0,
        })
    }
}

/// Advisory operations
#[async_trait]
pub trait Advisories: Configured {
    /// Current service advisories
    async fn request_bsa(&self) -> Result<AdvisoriesResponse, BartError> {
        self.transport().fetch(&ApiRequest::new(PATH, "bsa")).await
    }

    /// Current elevator outages
    async fn request_elevator(&self) -> Result<ElevatorResponse, BartError> {
        self.transport().fetch(&ApiRequest::new(PATH, "elev")).await
    }

    /// Number of trains in service
    async fn request_train_count(&self) -> Result<TrainCountResponse, BartError> {
        self.transport().fetch(&ApiRequest::new(PATH, "count")).await
    }
}

facade! {
    /// Advisories endpoint on its own
    AdvisoriesApi => Advisories
}
