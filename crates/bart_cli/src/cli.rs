//! Command-line definition

use std::path::PathBuf;

use bart_api::{BartConfig, TripParams};
use clap::{Args, Parser, Subcommand};

/// Query the BART API from the command line
#[derive(Debug, Parser)]
#[command(name = "bart")]
#[command(author, version, about = "BART real-time and schedule information", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API key (overrides bart.toml and BART_KEY)
    #[arg(short, long, global = true)]
    pub key: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Settings file (default: ./bart.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Let command-line flags override loaded settings
    pub fn apply(&self, config: &mut BartConfig) {
        if let Some(key) = &self.key {
            config.key.clone_from(key);
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }
    }
}

/// Trip planning arguments shared by `arrive` and `depart`
#[derive(Debug, Clone, Args)]
pub struct TripArgs {
    /// Origin station abbreviation
    pub orig: String,

    /// Destination station abbreviation
    pub dest: String,

    /// Time, e.g. `9:15am` (default: now)
    #[arg(long)]
    pub time: Option<String>,

    /// Date, `mm/dd/yyyy` (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Trips before the requested time
    #[arg(short, long, default_value_t = 0)]
    pub before: u32,

    /// Trips after the requested time
    #[arg(short, long, default_value_t = 0)]
    pub after: u32,

    /// Include the legend
    #[arg(short, long)]
    pub legend: bool,
}

impl From<TripArgs> for TripParams {
    fn from(args: TripArgs) -> Self {
        Self {
            orig: args.orig,
            dest: args.dest,
            time: args.time,
            date: args.date,
            before: args.before,
            after: args.after,
            legend: args.legend,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Current service advisories
    Advisories,

    /// Current elevator outages
    Elevators,

    /// Number of trains in service
    TrainCount,

    /// Real-time departures from a station
    Departures {
        /// Station abbreviation or `all`
        orig: String,

        /// Platform number
        #[arg(short, long)]
        platform: Option<String>,

        /// Direction, `n` or `s`
        #[arg(short, long)]
        direction: Option<String>,
    },

    /// Active routes
    Routes {
        /// Date, `mm/dd/yyyy` (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Details of every active route
    RouteInfo {
        /// Date, `mm/dd/yyyy` (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Plan a trip arriving by a time
    Arrive(TripArgs),

    /// Plan a trip departing at a time
    Depart(TripArgs),

    /// Upcoming holidays
    Holidays,

    /// Published schedule editions
    Schedules,

    /// Special schedule notices
    Special,

    /// Full day timetable for a station
    StationSchedule {
        /// Station abbreviation
        orig: String,

        /// Date, `mm/dd/yyyy` (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Full timetable for a route
    RouteSchedule {
        /// Route number
        route: u32,

        /// Date, `mm/dd/yyyy` (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Time, e.g. `9:15am`
        #[arg(long)]
        time: Option<String>,

        /// Include the legend
        #[arg(short, long)]
        legend: bool,
    },

    /// Every station in the system
    Stations,

    /// Detailed information about a station
    StationInfo {
        /// Station abbreviation
        orig: String,
    },

    /// Access and neighbourhood information for a station
    StationAccess {
        /// Station abbreviation
        orig: String,
    },
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_from_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(255), "trace");
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from(["bart", "--key", "FOO", "--timeout", "3", "stations"]).unwrap();
        let mut config = BartConfig::with_key("FROM-FILE");
        cli.apply(&mut config);
        assert_eq!(config.key, "FOO");
        assert_eq!(config.timeout_secs, Some(3));
    }

    #[test]
    fn test_apply_keeps_settings_without_flags() {
        let cli = Cli::try_parse_from(["bart", "stations"]).unwrap();
        let mut config = BartConfig {
            timeout_secs: Some(9),
            ..BartConfig::with_key("FROM-FILE")
        };
        cli.apply(&mut config);
        assert_eq!(config.key, "FROM-FILE");
        assert_eq!(config.timeout_secs, Some(9));
    }

    #[test]
    fn test_trip_args_into_params() {
        let args = TripArgs {
            orig: "WOAK".to_string(),
            dest: "EMBR".to_string(),
            time: Some("9:15am".to_string()),
            date: None,
            before: 1,
            after: 2,
            legend: true,
        };
        let params = TripParams::from(args);
        assert_eq!(params.orig, "WOAK");
        assert_eq!(params.time.as_deref(), Some("9:15am"));
        assert_eq!((params.before, params.after), (1, 2));
        assert!(params.legend);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
