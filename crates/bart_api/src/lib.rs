//! Typed client for the BART (Bay Area Rapid Transit) JSON API
//!
//! Covers the five public endpoint families at `https://api.bart.gov/api`:
//! advisories, real-time estimates, routes, schedules and stations.
//!
//! # Architecture
//!
//! Every operation runs the same pipeline: build an [`ApiRequest`], turn it
//! into a URL signed with the configured key, fetch the body through an
//! [`HttpExecutor`], reject error envelopes (JSON or XML), then decode
//! `root` into the operation's response type.
//!
//! Operations are grouped into the façade traits [`Advisories`],
//! [`Estimates`], [`Routes`], [`Schedules`] and [`Stations`]. [`BartClient`]
//! implements all of them; the `*Api` structs implement one each.
//!
//! The agency's JSON is converted from XML, so scalars arrive in irregular
//! shapes (quoted numbers, CDATA objects, bare objects for one-element lists).
//! The decoders in [`scalar`] normalize them.
//!
//! # Example
//!
//! ```rust,ignore
//! use bart_api::{BartClient, Schedules, TripParams};
//!
//! let client = BartClient::default();
//! let plan = client
//!     .request_departures(&TripParams::new("WOAK", "EMBR").with_window(0, 3))
//!     .await?;
//! for trip in &plan.schedule.trips {
//!     println!("{} -> {}", trip.orig_time_min, trip.dest_time_min);
//! }
//! ```

mod advisories;
mod client;
mod config;
mod envelope;
mod error;
mod estimates;
mod models;
mod request;
mod routes;
pub mod scalar;
mod schedules;
pub mod station;
mod stations;
mod transport;

pub use advisories::{
    Advisories, AdvisoriesApi, AdvisoriesResponse, Advisory, ElevatorResponse, TrainCountResponse,
};
pub use client::BartClient;
pub use config::{BASE_URL, BartConfig, DEFAULT_KEY};
pub use error::BartError;
pub use estimates::{
    Departure, Estimate, EstimateParams, Estimates, EstimatesApi, EstimatesResponse,
    StationEstimates,
};
pub use models::ResponseMetadata;
pub use request::{ApiRequest, RESERVED_PARAMS};
pub use routes::{Route, RouteInfo, RouteInfoResponse, Routes, RoutesApi, RoutesResponse};
pub use schedules::{
    AvailableSchedulesResponse, Holiday, HolidaySchedulesResponse, RouteSchedulesResponse,
    ScheduleEdition, ScheduledStop, ScheduledTrain, Schedules, SchedulesApi, SpecialSchedule,
    SpecialSchedulesResponse, StationSchedule, StationScheduleItem, StationSchedulesResponse,
    Trip, TripLeg, TripMode, TripParams, TripSchedule, TripsResponse,
};
pub use stations::{
    Station, StationAccess, StationAccessResponse, StationInfo, StationInfoResponse, Stations,
    StationsApi, StationsResponse,
};
pub use transport::{HttpExecutor, HttpResponse, ReqwestExecutor};
