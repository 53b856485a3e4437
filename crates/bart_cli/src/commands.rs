//! Subcommand dispatch

use bart_api::{
    Advisories, BartClient, BartError, EstimateParams, Estimates, Routes, Schedules, Stations,
    TripParams,
};
use serde_json::Value;
use tracing::info;

use crate::cli::Commands;

/// Run one subcommand and return its response as JSON
pub async fn execute(client: &BartClient, command: Commands) -> Result<Value, BartError> {
    info!(?command, "Running command");

    match command {
        Commands::Advisories => to_json(client.request_bsa().await?),
        Commands::Elevators => to_json(client.request_elevator().await?),
        Commands::TrainCount => to_json(client.request_train_count().await?),
        Commands::Departures {
            orig,
            platform,
            direction,
        } => {
            let params = EstimateParams {
                orig,
                plat: platform,
                dir: direction,
            };
            to_json(client.request_estimate(&params).await?)
        },
        Commands::Routes { date } => to_json(client.request_routes(date.as_deref()).await?),
        Commands::RouteInfo { date } => {
            to_json(client.request_route_info(date.as_deref()).await?)
        },
        Commands::Arrive(args) => {
            to_json(client.request_arrivals(&TripParams::from(args)).await?)
        },
        Commands::Depart(args) => {
            to_json(client.request_departures(&TripParams::from(args)).await?)
        },
        Commands::Holidays => to_json(client.request_holiday_schedules().await?),
        Commands::Schedules => to_json(client.request_available_schedules().await?),
        Commands::Special => to_json(client.request_special_schedules().await?),
        Commands::StationSchedule { orig, date } => to_json(
            client
                .request_station_schedules(&orig, date.as_deref())
                .await?,
        ),
        Commands::RouteSchedule {
            route,
            date,
            time,
            legend,
        } => to_json(
            client
                .request_route_schedules(route, date.as_deref(), time.as_deref(), legend)
                .await?,
        ),
        Commands::Stations => to_json(client.request_stations().await?),
        Commands::StationInfo { orig } => to_json(client.request_station_info(&orig).await?),
        Commands::StationAccess { orig } => {
            to_json(client.request_station_access(&orig).await?)
        },
    }
}

fn to_json<T: serde::Serialize>(response: T) -> Result<Value, BartError> {
    serde_json::to_value(response).map_err(|e| BartError::ParseError(e.to_string()))
}
