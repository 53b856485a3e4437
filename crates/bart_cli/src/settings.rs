//! Settings loading
//!
//! Sources, lowest precedence first: `bart.toml` (or the file given with
//! `--config`), then `BART_*` environment variables such as `BART_KEY` and
//! `BART_TIMEOUT_SECS`. Command-line flags are applied on top by the caller.

use std::path::Path;

use bart_api::BartConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};

/// Settings file looked up in the working directory
pub const DEFAULT_FILE: &str = "bart";

/// Prefix of the environment variables read
pub const ENV_PREFIX: &str = "BART";

/// Load settings from the settings file and the environment
pub fn load(path: Option<&Path>) -> Result<BartConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_FILE).required(false),
    };

    finish(
        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
    )
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<BartConfig, ConfigError> {
    let config: BartConfig = builder.build()?.try_deserialize()?;
    config.validate().map_err(ConfigError::Message)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<BartConfig, ConfigError> {
        finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_empty_settings() {
        let config = from_toml("").unwrap();
        assert!(config.key.is_empty());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_toml_settings() {
        let config = from_toml("key = \"FOO-BAR\"\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.key, "FOO-BAR");
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn test_invalid_settings() {
        let err = from_toml("timeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(load(Some(Path::new("/nonexistent/bart.toml"))).is_err());
    }
}
