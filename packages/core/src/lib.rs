// ABOUTME: Core types and constants for the Auto DB Backup extension
// ABOUTME: Foundational package shared by the configuration and settings packages

pub mod constants;
pub mod types;

// Re-export main types
pub use types::{BackupSettings, Filetype, FiletypeParseError};
