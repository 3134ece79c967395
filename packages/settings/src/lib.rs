// ABOUTME: Backup settings administration for the Auto DB Backup extension
// ABOUTME: Host service interfaces, schedule parsing, codec probing and the settings controller

pub mod codecs;
pub mod controller;
pub mod error;
pub mod lang;
pub mod schedule;
pub mod services;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod controller_tests;

pub use codecs::RuntimeCodecProbe;
pub use controller::{AdminController, AdminServices};
pub use error::{AdminError, AdminErrorKind};
pub use lang::EnglishCatalogue;
pub use schedule::parse_schedule;
pub use services::{
    AuditLog, Clock, CompressionProbe, ConfigStore, FormKeyGuard, Language, LogEntry, Request,
    SystemClock, Template, TemplateVars, TextDirection, UserContext,
};
pub use store::{MemoryConfig, SettingsStore};
pub use types::{BackLink, Notice, Outcome};
pub use validation::ValidationError;
