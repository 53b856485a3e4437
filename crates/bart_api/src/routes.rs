//! Route listings (`/route.aspx`)

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{Configured, facade};
use crate::error::BartError;
use crate::models::ResponseMetadata;
use crate::request::ApiRequest;
use crate::scalar;

const PATH: &str = "/route.aspx";

/// `{ "route": [..] }` wrapper around route lists
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RouteList<T> {
    #[serde(default = "Vec::new", deserialize_with = "scalar::one_or_many")]
    route: Vec<T>,
}

impl<T> Default for RouteList<T> {
    fn default() -> Self {
        Self { route: Vec::new() }
    }
}

fn route_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    scalar::blank_or::<D, RouteList<T>>(deserializer).map(|list| list.route)
}

/// `{ "station": [..] }` wrapper around a route's station sequence
#[derive(Default, Deserialize)]
struct RouteConfig {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    station: Vec<String>,
}

fn route_stations<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    scalar::blank_or::<D, RouteConfig>(deserializer).map(|config| config.station)
}

/// Summary of one route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// e.g. `Richmond - Berryessa/North San Jose`
    pub name: String,

    /// e.g. `RICH-BERY`
    pub abbr: String,

    /// e.g. `ROUTE 3`
    #[serde(rename = "routeID")]
    pub route_id: String,

    #[serde(deserialize_with = "scalar::number")]
    pub number: u32,

    #[serde(default)]
    pub hexcolor: String,

    #[serde(default)]
    pub color: String,
}

/// Full description of one route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub name: String,
    pub abbr: String,

    #[serde(rename = "routeID")]
    pub route_id: String,

    #[serde(deserialize_with = "scalar::number")]
    pub number: u32,

    /// Origin station abbreviation
    #[serde(default)]
    pub origin: String,

    /// Destination station abbreviation
    #[serde(default)]
    pub destination: String,

    #[serde(default)]
    pub direction: String,

    #[serde(default)]
    pub hexcolor: String,

    #[serde(default)]
    pub color: String,

    /// Whether the route runs on holidays
    #[serde(default, deserialize_with = "scalar::flag")]
    pub holidays: bool,

    #[serde(default, alias = "num_stations", deserialize_with = "scalar::number")]
    pub num_stns: u32,

    /// Station abbreviations in running order
    #[serde(rename = "config", default, deserialize_with = "route_stations")]
    pub stations: Vec<String>,
}

/// Response of `cmd=routes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,

    /// Schedule the listing belongs to
    #[serde(default, deserialize_with = "scalar::number")]
    pub sched_num: u32,

    #[serde(default, deserialize_with = "route_list")]
    pub routes: Vec<Route>,
}

/// Response of `cmd=routeinfo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInfoResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,

    #[serde(default, deserialize_with = "scalar::number")]
    pub sched_num: u32,

    #[serde(default, deserialize_with = "route_list")]
    pub routes: Vec<RouteInfo>,
}

fn routes_request(cmd: &'static str, date: Option<&str>) -> ApiRequest {
    let request = ApiRequest::new(PATH, cmd);
    let request = if cmd == "routeinfo" {
        request.with("route", "all")
    } else {
        request
    };
    request.with_optional("date", date)
}

/// Route operations
#[async_trait]
pub trait Routes: Configured {
    /// Every route active on `date` (`mm/dd/yyyy`, `today` or `now`; default
    /// today). The date is sent as given.
    async fn request_routes(&self, date: Option<&str>) -> Result<RoutesResponse, BartError> {
        self.transport()
            .fetch(&routes_request("routes", date))
            .await
    }

    /// Details of every route active on `date`
    async fn request_route_info(
        &self,
        date: Option<&str>,
    ) -> Result<RouteInfoResponse, BartError> {
        self.transport()
            .fetch(&routes_request("routeinfo", date))
            .await
    }
}

facade! {
    /// Routes endpoint on its own
    RoutesApi => Routes
}
