// ABOUTME: Configuration and environment variable management for the settings panel
// ABOUTME: Resolves the server timezone and the date format used to display schedules

pub mod constants;

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use std::env;
use thiserror::Error;
use tracing::{debug, warn};

use constants::{
    AUTOBACKUP_DATE_FORMAT, AUTOBACKUP_SERVER_TIMEZONE, DEFAULT_DATE_FORMAT,
    DEFAULT_SERVER_TIMEZONE, TZ,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid server timezone: {0}")]
    InvalidTimezone(String),
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Server default timezone shown next to the schedule picker
    pub server_timezone: Tz,
    /// strftime pattern used to render the next backup time
    pub date_format: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            server_timezone: Tz::UTC,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl PanelConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_timezone = match lookup(AUTOBACKUP_SERVER_TIMEZONE) {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(name.clone()))?,
            None => timezone_from_tz_var(lookup(TZ)),
        };

        let date_format =
            lookup(AUTOBACKUP_DATE_FORMAT).unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        validate_date_format(&date_format)?;

        debug!(
            server_timezone = server_timezone.name(),
            date_format = %date_format,
            "Loaded panel configuration"
        );

        Ok(PanelConfig {
            server_timezone,
            date_format,
        })
    }
}

/// TZ may hold a path such as ":/etc/localtime", so an unusable value falls back to UTC
fn timezone_from_tz_var(value: Option<String>) -> Tz {
    let Some(value) = value else {
        return Tz::UTC;
    };

    let name = value.trim().trim_start_matches(':');
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(
                tz = %value,
                fallback = DEFAULT_SERVER_TIMEZONE,
                "TZ is not an IANA timezone name, using fallback"
            );
            Tz::UTC
        }
    }
}

fn validate_date_format(format: &str) -> Result<(), ConfigError> {
    if format.trim().is_empty() {
        return Err(ConfigError::InvalidDateFormat(format.to_string()));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDateFormat(format.to_string()));
    }

    Ok(())
}
