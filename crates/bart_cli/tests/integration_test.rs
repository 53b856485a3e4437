//! Integration tests for CLI
//!
//! Command parsing, plus dispatch of a few commands against a mock server.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;

use bart_api::{BartClient, BartConfig, BartError};
use bart_cli::cli::{Cli, Commands};
use bart_cli::commands;
use clap::Parser;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_simple_commands() {
    let command = |name: &str| parse_args(&["bart", name]).unwrap().command;
    assert!(matches!(command("advisories"), Commands::Advisories));
    assert!(matches!(command("elevators"), Commands::Elevators));
    assert!(matches!(command("train-count"), Commands::TrainCount));
    assert!(matches!(command("holidays"), Commands::Holidays));
    assert!(matches!(command("schedules"), Commands::Schedules));
    assert!(matches!(command("special"), Commands::Special));
    assert!(matches!(command("stations"), Commands::Stations));
    assert!(matches!(command("routes"), Commands::Routes { date: None }));
    assert!(matches!(command("route-info"), Commands::RouteInfo { date: None }));
}

#[test]
fn cli_parses_departures() {
    let cli = parse_args(&["bart", "departures", "MCAR", "-p", "2", "--direction", "s"]).unwrap();
    if let Commands::Departures {
        orig,
        platform,
        direction,
    } = cli.command
    {
        assert_eq!(orig, "MCAR");
        assert_eq!(platform.as_deref(), Some("2"));
        assert_eq!(direction.as_deref(), Some("s"));
    } else {
        panic!("Expected Departures command");
    }
}

#[test]
fn cli_requires_departures_origin() {
    assert!(parse_args(&["bart", "departures"]).is_err());
}

#[test]
fn cli_parses_depart_with_window() {
    let cli = parse_args(&[
        "bart", "depart", "WOAK", "EMBR", "--time", "9:15am", "-b", "1", "-a", "3", "--legend",
    ])
    .unwrap();
    if let Commands::Depart(args) = cli.command {
        assert_eq!(args.orig, "WOAK");
        assert_eq!(args.dest, "EMBR");
        assert_eq!(args.time.as_deref(), Some("9:15am"));
        assert_eq!(args.before, 1);
        assert_eq!(args.after, 3);
        assert!(args.legend);
    } else {
        panic!("Expected Depart command");
    }
}

#[test]
fn cli_parses_arrive_defaults() {
    let cli = parse_args(&["bart", "arrive", "WOAK", "EMBR"]).unwrap();
    if let Commands::Arrive(args) = cli.command {
        assert_eq!(args.before, 0);
        assert_eq!(args.after, 0);
        assert!(args.time.is_none());
        assert!(!args.legend);
    } else {
        panic!("Expected Arrive command");
    }
}

#[test]
fn cli_parses_route_schedule() {
    let cli = parse_args(&["bart", "route-schedule", "6", "--date", "today", "-l"]).unwrap();
    if let Commands::RouteSchedule {
        route,
        date,
        time,
        legend,
    } = cli.command
    {
        assert_eq!(route, 6);
        assert_eq!(date.as_deref(), Some("today"));
        assert!(time.is_none());
        assert!(legend);
    } else {
        panic!("Expected RouteSchedule command");
    }
}

#[test]
fn cli_rejects_non_numeric_route() {
    assert!(parse_args(&["bart", "route-schedule", "red"]).is_err());
}

#[test]
fn cli_parses_station_commands() {
    let cli = parse_args(&["bart", "station-info", "ROCK"]).unwrap();
    assert!(matches!(cli.command, Commands::StationInfo { ref orig } if orig == "ROCK"));

    let cli = parse_args(&["bart", "station-access", "ROCK"]).unwrap();
    assert!(matches!(cli.command, Commands::StationAccess { .. }));

    let cli = parse_args(&["bart", "station-schedule", "12TH", "-d", "05/09/2024"]).unwrap();
    assert!(matches!(cli.command, Commands::StationSchedule { ref date, .. } if date.as_deref() == Some("05/09/2024")));
}

#[test]
fn cli_parses_global_flags_after_subcommand() {
    let cli = parse_args(&["bart", "routes", "-vv", "--key", "FOO", "--timeout", "4"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.key.as_deref(), Some("FOO"));
    assert_eq!(cli.timeout, Some(4));
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["bart"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(parse_args(&["bart", "teleport"]).is_err());
}

// ============================================================================
// Dispatch
// ============================================================================

fn client_for(server: &MockServer) -> BartClient {
    BartClient::new(Some(BartConfig::with_key("cli-key")))
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn dispatch_train_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bsa.aspx"))
        .and(query_param("cmd", "count"))
        .and(query_param("key", "cli-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"root":{"traincount":"48"}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse_args(&["bart", "train-count"]).unwrap();
    let output = commands::execute(&client_for(&server), cli.command)
        .await
        .unwrap();
    assert_eq!(output["traincount"], 48);
}

#[tokio::test]
async fn dispatch_departures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/etd.aspx"))
        .and(query_param("orig", "MCAR"))
        .and(query_param("plat", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"root":{"station":{"name":"MacArthur","abbr":"MCAR","etd":""}}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse_args(&["bart", "departures", "MCAR", "-p", "2"]).unwrap();
    let output = commands::execute(&client_for(&server), cli.command)
        .await
        .unwrap();
    assert_eq!(output["station"][0]["abbr"], "MCAR");
}

#[tokio::test]
async fn dispatch_surfaces_remote_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stn.aspx"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"root":{"message":{"error":{"text":"Invalid orig","details":"XXXX"}}}}"#),
        )
        .mount(&server)
        .await;

    let cli = parse_args(&["bart", "station-info", "XXXX"]).unwrap();
    let err = commands::execute(&client_for(&server), cli.command)
        .await
        .unwrap_err();
    assert!(matches!(err, BartError::Remote(_)));
}

#[tokio::test]
async fn dispatch_rejects_bad_station_locally() {
    let server = MockServer::start().await;
    let cli = parse_args(&["bart", "station-access", "Rockridge"]).unwrap();
    let err = commands::execute(&client_for(&server), cli.command)
        .await
        .unwrap_err();
    assert!(matches!(err, BartError::InvalidStation(_)));
}
