// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of the environment variables read by the settings panel

// Panel Configuration
pub const AUTOBACKUP_SERVER_TIMEZONE: &str = "AUTOBACKUP_SERVER_TIMEZONE";
pub const AUTOBACKUP_DATE_FORMAT: &str = "AUTOBACKUP_DATE_FORMAT";

// System Environment Variables
pub const TZ: &str = "TZ";

// Defaults
pub const DEFAULT_SERVER_TIMEZONE: &str = "UTC";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";
