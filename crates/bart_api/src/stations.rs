//! Station information (`/stn.aspx`)

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{Configured, facade};
use crate::error::BartError;
use crate::models::ResponseMetadata;
use crate::request::ApiRequest;
use crate::{scalar, station};

const PATH: &str = "/stn.aspx";

fn station_request(cmd: &'static str, orig: &str) -> Result<ApiRequest, BartError> {
    let orig = station::validate(orig)?;
    Ok(ApiRequest::new(PATH, cmd).with("orig", orig))
}

/// `{ "station": .. }` wrapper the agency puts around single stations
#[derive(Default, Deserialize)]
struct Single<T> {
    #[serde(default)]
    station: T,
}

fn single_station<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    scalar::blank_or::<D, Single<T>>(deserializer).map(|single| single.station)
}

#[derive(Default, Deserialize)]
struct StationList {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    station: Vec<Station>,
}

fn station_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Station>, D::Error> {
    scalar::blank_or::<D, StationList>(deserializer).map(|list| list.station)
}

#[derive(Default, Deserialize)]
struct RouteNames {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    route: Vec<String>,
}

fn route_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    scalar::blank_or::<D, RouteNames>(deserializer).map(|names| names.route)
}

#[derive(Default, Deserialize)]
struct Platforms {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    platform: Vec<String>,
}

fn platforms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    scalar::blank_or::<D, Platforms>(deserializer).map(|p| p.platform)
}

/// Entry of the station list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub abbr: String,
    #[serde(rename = "gtfs_latitude", deserialize_with = "scalar::number")]
    pub latitude: f64,
    #[serde(rename = "gtfs_longitude", deserialize_with = "scalar::number")]
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
}

/// Response of `cmd=stns`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationsResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default, deserialize_with = "station_list")]
    pub stations: Vec<Station>,
}

/// Detailed description of one station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub name: String,
    pub abbr: String,
    #[serde(rename = "gtfs_latitude", deserialize_with = "scalar::number")]
    pub latitude: f64,
    #[serde(rename = "gtfs_longitude", deserialize_with = "scalar::number")]
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,

    /// Routes serving the northbound platforms
    #[serde(default, deserialize_with = "route_names")]
    pub north_routes: Vec<String>,
    #[serde(default, deserialize_with = "route_names")]
    pub south_routes: Vec<String>,
    #[serde(default, deserialize_with = "platforms")]
    pub north_platforms: Vec<String>,
    #[serde(default, deserialize_with = "platforms")]
    pub south_platforms: Vec<String>,
    #[serde(default)]
    pub platform_info: String,

    #[serde(default, deserialize_with = "scalar::cdata")]
    pub intro: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub cross_street: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub food: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub shopping: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub attraction: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub link: String,
}

/// Response of `cmd=stninfo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationInfoResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(rename = "stations", default, deserialize_with = "single_station")]
    pub station: StationInfo,
}

/// How to reach a station and what is around it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationAccess {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbr: String,

    #[serde(rename = "@parking_flag", default, deserialize_with = "scalar::flag")]
    pub parking_flag: bool,
    #[serde(rename = "@bike_flag", default, deserialize_with = "scalar::flag")]
    pub bike_flag: bool,
    #[serde(rename = "@bike_station_flag", default, deserialize_with = "scalar::flag")]
    pub bike_station_flag: bool,
    #[serde(rename = "@locker_flag", default, deserialize_with = "scalar::flag")]
    pub locker_flag: bool,

    #[serde(default, deserialize_with = "scalar::cdata")]
    pub entering: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub exiting: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub parking: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub fill_time: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub car_share: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub lockers: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub bike_station_text: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub destinations: String,
    #[serde(default)]
    pub link: String,
}

/// Response of `cmd=stnaccess`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationAccessResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(rename = "stations", default, deserialize_with = "single_station")]
    pub station: StationAccess,
}

/// Station operations
#[async_trait]
pub trait Stations: Configured {
    /// Access and neighbourhood information for `orig`
    ///
    /// # Errors
    ///
    /// Returns [`BartError::InvalidStation`] before any request is made if
    /// `orig` is not a station abbreviation.
    async fn request_station_access(
        &self,
        orig: &str,
    ) -> Result<StationAccessResponse, BartError> {
        let request = station_request("stnaccess", orig)?;
        self.transport().fetch(&request).await
    }

    /// Detailed information about `orig`
    ///
    /// # Errors
    ///
    /// Same as [`Stations::request_station_access`].
    async fn request_station_info(&self, orig: &str) -> Result<StationInfoResponse, BartError> {
        let request = station_request("stninfo", orig)?;
        self.transport().fetch(&request).await
    }

    /// Every station in the system
    async fn request_stations(&self) -> Result<StationsResponse, BartError> {
        self.transport().fetch(&ApiRequest::new(PATH, "stns")).await
    }
}

facade! {
    /// Stations endpoint on its own
    StationsApi => Stations
}
