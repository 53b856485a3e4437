//! Command-line front end for the BART API client
//!
//! The `bart` binary prints every response as pretty JSON. Settings come from
//! `bart.toml`, `BART_*` environment variables and flags, in increasing
//! precedence.

pub mod cli;
pub mod commands;
pub mod settings;
