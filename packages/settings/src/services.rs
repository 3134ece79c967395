// ABOUTME: Interfaces to the host application services used by the settings controller
// ABOUTME: Config store, request, template, user, audit log, language, form key, codecs and clock

use autobackup_core::constants::MSG_DIRECTION;
use autobackup_core::Filetype;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Named scalar values handed to the template renderer
pub type TemplateVars = Map<String, Value>;

/// Host key-value configuration store
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Last writer wins; the host provides no versioning.
    fn set(&mut self, key: &str, value: &str);
}

/// Accessor for the submitted form
pub trait Request {
    /// Whether `name` was submitted in the POST body
    fn is_set_post(&self, name: &str) -> bool;

    /// Integer field, or `default` when missing or not a number
    fn variable_int(&self, name: &str, default: i64) -> i64;

    fn variable_str(&self, name: &str, default: &str) -> String;
}

pub trait Template {
    fn assign_vars(&mut self, vars: TemplateVars);

    /// Append one row to a repeated template block
    fn assign_block_vars(&mut self, block: &str, vars: TemplateVars);
}

/// The administrator making the request
pub trait UserContext {
    fn user_id(&self) -> i64;
    fn ip(&self) -> &str;
    /// IANA timezone name from the user's profile
    fn timezone(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub operation: &'static str,
    pub user_id: i64,
    pub ip: String,
    pub message_code: &'static str,
}

/// Append-only administration log
pub trait AuditLog {
    fn add(&mut self, entry: LogEntry);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

pub trait Language {
    /// Register a language bundle shipped by `extension`
    fn add_lang(&mut self, bundle: &str, extension: &str);

    fn lang(&self, key: &str) -> String;

    /// Resolve a nested message such as `[FILETYPE, gzip]`
    fn lang_with(&self, key: &str, param: &str) -> String;

    fn direction(&self) -> TextDirection {
        if self.lang(MSG_DIRECTION) == "rtl" {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// Anti-forgery check bound to a named form
#[cfg_attr(test, mockall::automock)]
pub trait FormKeyGuard {
    fn add_form_key(&mut self, name: &str);
    fn check_form_key(&self, name: &str) -> bool;
}

/// Detects which backup filetypes this runtime can produce
#[cfg_attr(test, mockall::automock)]
pub trait CompressionProbe {
    fn available(&self) -> BTreeSet<Filetype>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
