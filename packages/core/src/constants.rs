// ABOUTME: Configuration keys, form field names and message codes
// ABOUTME: Centralized definitions shared by the settings controller and the backup task

/// Version reported in the settings page header
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension name used when registering language bundles
pub const EXTENSION_NAME: &str = "autodbbackup";

// Configuration store keys
pub const CONFIG_ENABLE: &str = "auto_db_backup_enable";
pub const CONFIG_COPIES: &str = "auto_db_backup_copies";
pub const CONFIG_FILETYPE: &str = "auto_db_backup_filetype";
pub const CONFIG_GC: &str = "auto_db_backup_gc";
pub const CONFIG_MAINTAIN_FREQ: &str = "auto_db_backup_maintain_freq";
pub const CONFIG_NEXT_GC: &str = "auto_db_backup_next_gc";
pub const CONFIG_OPTIMIZE: &str = "auto_db_backup_optimize";

/// Every key owned by the backup settings record
pub const CONFIG_KEYS: [&str; 7] = [
    CONFIG_ENABLE,
    CONFIG_COPIES,
    CONFIG_FILETYPE,
    CONFIG_GC,
    CONFIG_MAINTAIN_FREQ,
    CONFIG_NEXT_GC,
    CONFIG_OPTIMIZE,
];

// Submitted form fields
pub const FIELD_SUBMIT: &str = "submit";
pub const FIELD_TIME: &str = "auto_db_time";
pub const FIELD_ENABLE: &str = CONFIG_ENABLE;
pub const FIELD_COPIES: &str = CONFIG_COPIES;
pub const FIELD_FILETYPE: &str = CONFIG_FILETYPE;
pub const FIELD_GC: &str = CONFIG_GC;
pub const FIELD_MAINTAIN_FREQ: &str = CONFIG_MAINTAIN_FREQ;
pub const FIELD_OPTIMIZE: &str = CONFIG_OPTIMIZE;

/// Form key protecting the settings form
pub const FORM_KEY: &str = "auto_db_backup";

// Language bundles
pub const LANG_BUNDLE_ACP: &str = "acp_autobackup";
pub const LANG_BUNDLE_DATE_PICKER: &str = "date_time_picker";

// Message codes
pub const MSG_FORM_INVALID: &str = "FORM_INVALID";
pub const MSG_DATE_FORMAT_ERROR: &str = "DATE_FORMAT_ERROR";
pub const MSG_TIME_ERROR: &str = "AUTO_DB_BACKUP_TIME_ERROR";
pub const MSG_SETTINGS_CHANGED: &str = "AUTO_DB_BACKUP_SETTINGS_CHANGED";
pub const MSG_SETTINGS: &str = "AUTO_DB_BACKUP_SETTINGS";
pub const MSG_SETTINGS_EXPLAIN: &str = "AUTO_DB_BACKUP_SETTINGS_EXPLAIN";
pub const MSG_FILETYPE: &str = "FILETYPE";
pub const MSG_DIRECTION: &str = "DIRECTION";
pub const MSG_BACK_TO_PREV: &str = "BACK_TO_PREV";

/// Audit log message recorded when an administrator saves the settings
pub const LOG_SETTINGS_CHANGED: &str = "LOG_AUTO_DB_BACKUP_SETTINGS";

/// Template block holding one row per selectable filetype
pub const BLOCK_FILETYPES: &str = "filetypes";
