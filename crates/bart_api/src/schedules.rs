//! Timetables and trip planning (`/sched.aspx`)

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{Configured, facade};
use crate::error::BartError;
use crate::models::ResponseMetadata;
use crate::request::ApiRequest;
use crate::{scalar, station};

const PATH: &str = "/sched.aspx";

/// Which end of a trip the requested time pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripMode {
    /// Arrive by the requested time (`cmd=arrive`)
    Arrive,
    /// Depart at the requested time (`cmd=depart`)
    Depart,
}

impl TripMode {
    /// Command token for this mode
    #[must_use]
    pub const fn cmd(self) -> &'static str {
        match self {
            Self::Arrive => "arrive",
            Self::Depart => "depart",
        }
    }
}

impl fmt::Display for TripMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cmd())
    }
}

/// Parameters of a trip plan request
///
/// `before`/`after` ask for extra trips either side of the requested time.
/// `before = 0` together with `after` of `0` or `1` sends neither, since the
/// agency answers those combinations with an unusable shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripParams {
    /// Origin station abbreviation
    pub orig: String,
    /// Destination station abbreviation
    pub dest: String,
    /// `h:mm+am|pm` or `now`; `None` for now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// `mm/dd/yyyy`, `today` or `now`; `None` for today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub before: u32,
    #[serde(default)]
    pub after: u32,
    /// Ask for the legend text
    #[serde(default)]
    pub legend: bool,
}

impl TripParams {
    /// Trip from `orig` to `dest`, now
    #[must_use]
    pub fn new(orig: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            orig: orig.into(),
            dest: dest.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Extra trips before and after the requested time
    #[must_use]
    pub const fn with_window(mut self, before: u32, after: u32) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    #[must_use]
    pub const fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Whether `b` and `a` are left out of the request
    #[must_use]
    pub const fn omits_window(&self) -> bool {
        self.before == 0 && self.after <= 1
    }

    /// Build the request for `mode`
    ///
    /// # Errors
    ///
    /// Returns [`BartError::InvalidStation`] if either end is not a station
    /// abbreviation.
    pub fn to_request(&self, mode: TripMode) -> Result<ApiRequest, BartError> {
        let orig = station::validate(&self.orig)?;
        let dest = station::validate(&self.dest)?;

        let mut request = ApiRequest::new(PATH, mode.cmd())
            .with("orig", orig)
            .with("dest", dest)
            .with_optional("time", self.time.as_deref())
            .with_optional("date", self.date.as_deref());

        if self.legend {
            request = request.with("l", "1");
        }

        if !self.omits_window() {
            request = request
                .with("b", self.before.to_string())
                .with("a", self.after.to_string());
        }

        Ok(request)
    }
}

fn stnsched_request(orig: &str, date: Option<&str>) -> Result<ApiRequest, BartError> {
    let orig = station::validate(orig)?;
    Ok(ApiRequest::new(PATH, "stnsched")
        .with("orig", orig)
        .with_optional("date", date))
}

fn routesched_request(
    route: u32,
    date: Option<&str>,
    time: Option<&str>,
    legend: bool,
) -> Result<ApiRequest, BartError> {
    if route == 0 {
        return Err(BartError::InvalidParameter(
            "route number must be positive".to_string(),
        ));
    }

    let request = ApiRequest::new(PATH, "routesched")
        .with("route", route.to_string())
        .with_optional("date", date)
        .with_optional("time", time);

    Ok(if legend { request.with("l", "1") } else { request })
}

// Trip plans

/// One leg of a trip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLeg {
    #[serde(rename = "@order", default, deserialize_with = "scalar::number")]
    pub order: u32,
    #[serde(rename = "@transfercode", default)]
    pub transfer_code: String,
    #[serde(rename = "@origin", default)]
    pub origin: String,
    #[serde(rename = "@destination", default)]
    pub destination: String,
    #[serde(rename = "@origTimeMin", default)]
    pub orig_time_min: String,
    #[serde(rename = "@origTimeDate", default)]
    pub orig_time_date: String,
    #[serde(rename = "@destTimeMin", default)]
    pub dest_time_min: String,
    #[serde(rename = "@destTimeDate", default)]
    pub dest_time_date: String,
    /// Route, e.g. `ROUTE 7`
    #[serde(rename = "@line", default)]
    pub line: String,
    #[serde(rename = "@bikeflag", default, deserialize_with = "scalar::flag")]
    pub bikeflag: bool,
    #[serde(rename = "@trainHeadStation", default)]
    pub train_head_station: String,
    #[serde(rename = "@load", default, deserialize_with = "scalar::number")]
    pub load: u32,
    #[serde(rename = "@trainId", default)]
    pub train_id: String,
    #[serde(rename = "@trainIdx", default, deserialize_with = "scalar::number")]
    pub train_idx: u32,
}

/// One trip option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "@origin", default)]
    pub origin: String,
    #[serde(rename = "@destination", default)]
    pub destination: String,
    /// Fare in dollars, as printed by the agency
    #[serde(rename = "@fare", default)]
    pub fare: String,
    #[serde(rename = "@origTimeMin", default)]
    pub orig_time_min: String,
    #[serde(rename = "@origTimeDate", default)]
    pub orig_time_date: String,
    #[serde(rename = "@destTimeMin", default)]
    pub dest_time_min: String,
    #[serde(rename = "@destTimeDate", default)]
    pub dest_time_date: String,
    #[serde(rename = "@clipper", default)]
    pub clipper: String,
    /// Travel time in minutes
    #[serde(rename = "@tripTime", default, deserialize_with = "scalar::number")]
    pub trip_time: u32,
    #[serde(rename = "@co2", default)]
    pub co2: String,
    #[serde(rename = "leg", default, deserialize_with = "scalar::one_or_many")]
    pub legs: Vec<TripLeg>,
}

#[derive(Default, Deserialize)]
struct TripList {
    #[serde(default, alias = "Trip", deserialize_with = "scalar::one_or_many")]
    trip: Vec<Trip>,
}

fn trip_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Trip>, D::Error> {
    scalar::blank_or::<D, TripList>(deserializer).map(|list| list.trip)
}

/// The `schedule` block of a trip plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSchedule {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, deserialize_with = "scalar::number")]
    pub before: u32,
    #[serde(default, deserialize_with = "scalar::number")]
    pub after: u32,
    #[serde(rename = "request", default, deserialize_with = "trip_list")]
    pub trips: Vec<Trip>,
}

/// Response of `cmd=arrive` and `cmd=depart`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripsResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, deserialize_with = "scalar::number")]
    pub sched_num: u32,
    #[serde(default, deserialize_with = "scalar::blank_or")]
    pub schedule: TripSchedule,
}

// Holidays

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    /// `mm/dd/yyyy`
    pub date: String,
    /// `Saturday` or `Sunday`
    #[serde(default)]
    pub schedule_type: String,
}

#[derive(Deserialize)]
struct HolidayList {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    holiday: Vec<Holiday>,
}

fn holiday_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Holiday>, D::Error> {
    let lists: Vec<HolidayList> = scalar::one_or_many(deserializer)?;
    Ok(lists.into_iter().flat_map(|list| list.holiday).collect())
}

/// Response of `cmd=holiday`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidaySchedulesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default, deserialize_with = "holiday_list")]
    pub holidays: Vec<Holiday>,
}

// Available schedules

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEdition {
    #[serde(rename = "@id", deserialize_with = "scalar::number")]
    pub id: u32,
    #[serde(rename = "@effectivedate", default)]
    pub effective_date: String,
}

#[derive(Default, Deserialize)]
struct ScheduleList {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    schedule: Vec<ScheduleEdition>,
}

fn schedule_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ScheduleEdition>, D::Error> {
    scalar::blank_or::<D, ScheduleList>(deserializer).map(|list| list.schedule)
}

/// Response of `cmd=scheds`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableSchedulesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default, deserialize_with = "schedule_list")]
    pub schedules: Vec<ScheduleEdition>,
}

// Special schedules

/// A special schedule notice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSchedule {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub text: String,
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub link: String,
    #[serde(default)]
    pub orig: String,
    #[serde(default)]
    pub dest: String,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub routes_affected: String,
}

#[derive(Default, Deserialize)]
struct SpecialScheduleList {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    special_schedule: Vec<SpecialSchedule>,
}

/// `special_schedules` is `""` when nothing special is planned
fn special_schedule_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<SpecialSchedule>, D::Error> {
    scalar::blank_or::<D, SpecialScheduleList>(deserializer).map(|list| list.special_schedule)
}

/// Response of `cmd=special`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialSchedulesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default, deserialize_with = "special_schedule_list")]
    pub special_schedules: Vec<SpecialSchedule>,
}

// Station schedules

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationScheduleItem {
    #[serde(rename = "@line", default)]
    pub line: String,
    #[serde(rename = "@trainHeadStation", default)]
    pub train_head_station: String,
    #[serde(rename = "@origTime", default)]
    pub orig_time: String,
    #[serde(rename = "@destTime", default)]
    pub dest_time: String,
    #[serde(rename = "@trainIdx", default, deserialize_with = "scalar::number")]
    pub train_idx: u32,
    #[serde(rename = "@bikeflag", default, deserialize_with = "scalar::flag")]
    pub bikeflag: bool,
    #[serde(rename = "@trainId", default)]
    pub train_id: String,
    #[serde(rename = "@load", default, deserialize_with = "scalar::number")]
    pub load: u32,
}

/// A station's timetable for one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSchedule {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(rename = "item", default, deserialize_with = "scalar::one_or_many")]
    pub items: Vec<StationScheduleItem>,
}

/// Response of `cmd=stnsched`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationSchedulesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default, deserialize_with = "scalar::number")]
    pub sched_num: u32,
    #[serde(default, deserialize_with = "scalar::blank_or")]
    pub station: StationSchedule,
}

// Route schedules

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledStop {
    #[serde(rename = "@station", default)]
    pub station: String,
    /// Departure time, absent where the train does not stop
    #[serde(rename = "@origTime", default, skip_serializing_if = "Option::is_none")]
    pub orig_time: Option<String>,
    #[serde(rename = "@load", default)]
    pub load: String,
    #[serde(rename = "@level", default)]
    pub level: String,
    #[serde(rename = "@bikeflag", default, deserialize_with = "scalar::flag")]
    pub bikeflag: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTrain {
    #[serde(rename = "@trainId", default)]
    pub train_id: String,
    #[serde(rename = "@trainIdx", default, deserialize_with = "scalar::number")]
    pub train_idx: u32,
    #[serde(rename = "@index", default, deserialize_with = "scalar::number")]
    pub index: u32,
    #[serde(rename = "stop", default, deserialize_with = "scalar::one_or_many")]
    pub stops: Vec<ScheduledStop>,
}

#[derive(Default, Deserialize)]
struct TrainList {
    #[serde(default, deserialize_with = "scalar::one_or_many")]
    train: Vec<ScheduledTrain>,
}

fn train_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ScheduledTrain>, D::Error> {
    scalar::blank_or::<D, TrainList>(deserializer).map(|list| list.train)
}

/// Response of `cmd=routesched`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSchedulesResponse {
    #[serde(flatten)]
    pub meta: ResponseMetadata,
    #[serde(default, deserialize_with = "scalar::number")]
    pub sched_num: u32,
    #[serde(rename = "route", default, deserialize_with = "train_list")]
    pub trains: Vec<ScheduledTrain>,
}

/// Schedule operations
#[async_trait]
pub trait Schedules: Configured {
    /// Trips arriving by the requested time
    ///
    /// # Errors
    ///
    /// Returns [`BartError::InvalidStation`] before any request is made if
    /// either end is not a station abbreviation.
    async fn request_arrivals(&self, params: &TripParams) -> Result<TripsResponse, BartError> {
        let request = params.to_request(TripMode::Arrive)?;
        self.transport().fetch(&request).await
    }

    /// Trips departing at the requested time
    ///
    /// # Errors
    ///
    /// Same as [`Schedules::request_arrivals`].
    async fn request_departures(&self, params: &TripParams) -> Result<TripsResponse, BartError> {
        let request = params.to_request(TripMode::Depart)?;
        self.transport().fetch(&request).await
    }

    /// Upcoming holidays and the schedule run on each
    async fn request_holiday_schedules(&self) -> Result<HolidaySchedulesResponse, BartError> {
        self.transport()
            .fetch(&ApiRequest::new(PATH, "holiday"))
            .await
    }

    /// Schedule editions currently published
    async fn request_available_schedules(
        &self,
    ) -> Result<AvailableSchedulesResponse, BartError> {
        self.transport()
            .fetch(&ApiRequest::new(PATH, "scheds"))
            .await
    }

    /// Special schedule notices in effect
    async fn request_special_schedules(&self) -> Result<SpecialSchedulesResponse, BartError> {
        self.transport()
            .fetch(&ApiRequest::new(PATH, "special"))
            .await
    }

    /// Full day timetable for a station; `date` defaults to today
    async fn request_station_schedules(
        &self,
        orig: &str,
        date: Option<&str>,
    ) -> Result<StationSchedulesResponse, BartError> {
        let request = stnsched_request(orig, date)?;
        self.transport().fetch(&request).await
    }

    /// Full timetable for one route number
    ///
    /// # Errors
    ///
    /// Returns [`BartError::InvalidParameter`] for route `0`.
    async fn request_route_schedules(
        &self,
        route: u32,
        date: Option<&str>,
        time: Option<&str>,
        legend: bool,
    ) -> Result<RouteSchedulesResponse, BartError> {
        let request = routesched_request(route, date, time, legend)?;
        self.transport().fetch(&request).await
    }
}

facade! {
    /// Schedules endpoint on its own
    SchedulesApi => Schedules
}
