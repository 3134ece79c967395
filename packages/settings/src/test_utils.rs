//! Recording fakes of the host services for exercising the settings controller

use autobackup_core::Filetype;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

use crate::services::{
    AuditLog, Clock, CompressionProbe, FormKeyGuard, LogEntry, Request, Template, TemplateVars,
    UserContext,
};

/// Submitted form backed by a map of raw field values
#[derive(Debug, Clone, Default)]
pub struct FormRequest {
    fields: HashMap<String, String>,
}

impl FormRequest {
    /// A request without a submit flag
    pub fn new() -> Self {
        Self::default()
    }

    /// A request with the submit flag set
    pub fn submitted() -> Self {
        Self::new().field("submit", "1")
    }

    pub fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}

impl Request for FormRequest {
    fn is_set_post(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn variable_int(&self, name: &str, default: i64) -> i64 {
        self.fields
            .get(name)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    fn variable_str(&self, name: &str, default: &str) -> String {
        self.fields
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTemplate {
    pub vars: TemplateVars,
    pub blocks: Vec<(String, TemplateVars)>,
}

impl RecordingTemplate {
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn rows(&self, block: &str) -> Vec<&TemplateVars> {
        self.blocks
            .iter()
            .filter(|(name, _)| name == block)
            .map(|(_, vars)| vars)
            .collect()
    }
}

impl Template for RecordingTemplate {
    fn assign_vars(&mut self, vars: TemplateVars) {
        self.vars.extend(vars);
    }

    fn assign_block_vars(&mut self, block: &str, vars: TemplateVars) {
        self.blocks.push((block.to_string(), vars));
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingAuditLog {
    pub entries: Vec<LogEntry>,
}

impl AuditLog for RecordingAuditLog {
    fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

#[derive(Debug, Clone)]
pub struct StaticUser {
    pub id: i64,
    pub ip: String,
    pub timezone: String,
}

impl StaticUser {
    pub fn admin(timezone: &str) -> Self {
        Self {
            id: 2,
            ip: "192.0.2.10".to_string(),
            timezone: timezone.to_string(),
        }
    }
}

impl UserContext for StaticUser {
    fn user_id(&self) -> i64 {
        self.id
    }

    fn ip(&self) -> &str {
        &self.ip
    }

    fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// Form key guard with a fixed verdict
#[derive(Debug, Clone, Default)]
pub struct StaticFormKey {
    pub valid: bool,
    pub registered: Vec<String>,
}

impl StaticFormKey {
    pub fn valid() -> Self {
        Self {
            valid: true,
            registered: Vec::new(),
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}

impl FormKeyGuard for StaticFormKey {
    fn add_form_key(&mut self, name: &str) {
        self.registered.push(name.to_string());
    }

    fn check_form_key(&self, name: &str) -> bool {
        self.valid && self.registered.iter().any(|key| key == name)
    }
}

#[derive(Debug, Clone)]
pub struct StaticCodecs(pub BTreeSet<Filetype>);

impl StaticCodecs {
    pub fn all() -> Self {
        Self(Filetype::ALL.into_iter().collect())
    }

    pub fn only(filetypes: &[Filetype]) -> Self {
        Self(filetypes.iter().copied().collect())
    }
}

impl CompressionProbe for StaticCodecs {
    fn available(&self) -> BTreeSet<Filetype> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
