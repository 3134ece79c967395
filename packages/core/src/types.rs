// ABOUTME: Type definitions for the backup settings record
// ABOUTME: Filetype enum and the flat BackupSettings structure with defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown backup filetype: {0}. Must be one of: text, gzip, bzip2")]
pub struct FiletypeParseError(pub String);

/// Compression applied to a backup file
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Filetype {
    Gzip,
    Bzip2,
    #[default]
    Text,
}

impl Filetype {
    /// Display order of the filetype options on the settings page
    pub const ALL: [Filetype; 3] = [Filetype::Gzip, Filetype::Bzip2, Filetype::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filetype::Gzip => "gzip",
            Filetype::Bzip2 => "bzip2",
            Filetype::Text => "text",
        }
    }
}

impl fmt::Display for Filetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filetype {
    type Err = FiletypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gzip" => Ok(Filetype::Gzip),
            "bzip2" => Ok(Filetype::Bzip2),
            "text" => Ok(Filetype::Text),
            _ => Err(FiletypeParseError(s.to_string())),
        }
    }
}

/// Backup schedule and retention settings, stored as seven config keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSettings {
    pub enable: bool,
    pub copies: u32,
    pub filetype: Filetype,
    pub gc: u32,
    pub maintain_freq: u32,
    /// Unix timestamp of the next scheduled backup
    pub next_gc: i64,
    pub optimize: bool,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            enable: false,
            copies: 5,
            filetype: Filetype::Text,
            gc: 1,
            maintain_freq: 1,
            next_gc: 0,
            optimize: false,
        }
    }
}
