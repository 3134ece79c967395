// ABOUTME: Administration controller for the backup settings page
// ABOUTME: Renders the settings form and validates, persists and audits submitted changes

use autobackup_config::constants::DEFAULT_DATE_FORMAT;
use autobackup_config::PanelConfig;
use autobackup_core::constants::{
    BLOCK_FILETYPES, EXTENSION_NAME, EXTENSION_VERSION, FIELD_COPIES, FIELD_ENABLE,
    FIELD_FILETYPE, FIELD_GC, FIELD_MAINTAIN_FREQ, FIELD_OPTIMIZE, FIELD_SUBMIT, FIELD_TIME,
    FORM_KEY, LANG_BUNDLE_ACP, LANG_BUNDLE_DATE_PICKER, LOG_SETTINGS_CHANGED, MSG_BACK_TO_PREV,
    MSG_FILETYPE, MSG_SETTINGS, MSG_SETTINGS_CHANGED, MSG_SETTINGS_EXPLAIN,
};
use autobackup_core::{BackupSettings, Filetype};
use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::{debug, info, warn};

use crate::error::{AdminError, AdminErrorKind};
use crate::schedule::parse_schedule;
use crate::services::{
    AuditLog, Clock, CompressionProbe, ConfigStore, FormKeyGuard, Language, LogEntry, Request,
    Template, TemplateVars, TextDirection, UserContext,
};
use crate::store::SettingsStore;
use crate::types::{BackLink, Notice, Outcome};
use crate::validation::{counter_value, flag_value, resolve_filetype};

/// Audit log operation for administration actions
const LOG_OPERATION_ADMIN: &str = "admin";

/// Host services borrowed for one administration request
pub struct AdminServices<'a> {
    pub config: &'a mut dyn ConfigStore,
    pub request: &'a dyn Request,
    pub template: &'a mut dyn Template,
    pub user: &'a dyn UserContext,
    pub log: &'a mut dyn AuditLog,
    pub language: &'a mut dyn Language,
    pub form_key: &'a mut dyn FormKeyGuard,
    pub codecs: &'a dyn CompressionProbe,
    pub clock: &'a dyn Clock,
}

pub struct AdminController<'a> {
    services: AdminServices<'a>,
    panel: PanelConfig,
    u_action: String,
}

impl<'a> AdminController<'a> {
    pub fn new(services: AdminServices<'a>, panel: PanelConfig) -> Self {
        Self {
            services,
            panel,
            u_action: String::new(),
        }
    }

    /// Set the page URL used as form action and back link target
    pub fn set_page_url(&mut self, u_action: impl Into<String>) {
        self.u_action = u_action.into();
    }

    pub fn page_url(&self) -> &str {
        &self.u_action
    }

    /// Display the options an administrator can configure, applying a submitted form first.
    ///
    /// A submit either fails before anything is written or stores all seven
    /// settings and ends with a confirmation notice.
    pub fn display_options(&mut self) -> Result<Outcome, AdminError> {
        self.services
            .language
            .add_lang(LANG_BUNDLE_ACP, EXTENSION_NAME);
        self.services
            .language
            .add_lang(LANG_BUNDLE_DATE_PICKER, EXTENSION_NAME);

        self.services.form_key.add_form_key(FORM_KEY);

        let current = SettingsStore::new(&mut *self.services.config).load();
        let mut available = self.services.codecs.available();
        available.insert(Filetype::Text);
        self.assign_filetypes(&available, current.filetype);

        if self.services.request.is_set_post(FIELD_SUBMIT) {
            return self.submit(&available);
        }

        self.assign_page(&current);
        Ok(Outcome::Rendered)
    }

    fn submit(&mut self, available: &BTreeSet<Filetype>) -> Result<Outcome, AdminError> {
        if !self.services.form_key.check_form_key(FORM_KEY) {
            warn!(
                user_id = self.services.user.user_id(),
                ip = %self.services.user.ip(),
                audit = true,
                "Backup settings form key validation failed"
            );
            return Err(self.error(AdminErrorKind::InvalidSubmission));
        }

        let now = self.services.clock.now();
        let raw_time = self.services.request.variable_str(FIELD_TIME, "");
        let Some(backup_date) = parse_schedule(&raw_time, self.user_timezone(), now) else {
            warn!(input = %raw_time, "Could not parse backup schedule");
            return Err(self.error(AdminErrorKind::InvalidSchedule));
        };

        let settings = self.submitted_settings(backup_date, available);
        if settings.enable && settings.next_gc <= now.timestamp() {
            warn!(
                next_gc = settings.next_gc,
                now = now.timestamp(),
                "Rejected backup schedule that is not in the future"
            );
            return Err(self.error(AdminErrorKind::ScheduleNotInFuture));
        }

        SettingsStore::new(&mut *self.services.config).save(&settings);

        let user_id = self.services.user.user_id();
        let ip = self.services.user.ip().to_string();
        self.services.log.add(LogEntry {
            operation: LOG_OPERATION_ADMIN,
            user_id,
            ip: ip.clone(),
            message_code: LOG_SETTINGS_CHANGED,
        });
        info!(
            user_id,
            ip = %ip,
            enable = settings.enable,
            next_gc = settings.next_gc,
            audit = true,
            "Backup settings changed"
        );

        Ok(Outcome::Notice(Notice {
            message: self.services.language.lang(MSG_SETTINGS_CHANGED),
            back_link: self.back_link(),
        }))
    }

    /// Build the record from the submitted fields and the parsed schedule
    fn submitted_settings(
        &self,
        backup_date: DateTime<Utc>,
        available: &BTreeSet<Filetype>,
    ) -> BackupSettings {
        let request = self.services.request;
        let filetype = request.variable_str(FIELD_FILETYPE, Filetype::Text.as_str());

        BackupSettings {
            enable: flag_value(request.variable_int(FIELD_ENABLE, 0)),
            copies: counter_value(FIELD_COPIES, request.variable_int(FIELD_COPIES, 0)),
            filetype: resolve_filetype(&filetype, available),
            gc: counter_value(FIELD_GC, request.variable_int(FIELD_GC, 0)),
            maintain_freq: counter_value(
                FIELD_MAINTAIN_FREQ,
                request.variable_int(FIELD_MAINTAIN_FREQ, 0),
            ),
            next_gc: backup_date.timestamp(),
            optimize: flag_value(request.variable_int(FIELD_OPTIMIZE, 0)),
        }
    }

    fn assign_filetypes(&mut self, available: &BTreeSet<Filetype>, selected: Filetype) {
        for filetype in Filetype::ALL {
            if !available.contains(&filetype) {
                continue;
            }

            let label = self
                .services
                .language
                .lang_with(MSG_FILETYPE, filetype.as_str());
            self.services.template.assign_block_vars(
                BLOCK_FILETYPES,
                into_vars(json!({
                    "FILETYPE": filetype.as_str(),
                    "VALUE": label,
                    "S_CHECKED": filetype == selected,
                })),
            );
        }
    }

    fn assign_page(&mut self, current: &BackupSettings) {
        let tz = self.user_timezone();
        let now = self.services.clock.now();
        let offset_minutes = tz
            .offset_from_utc_datetime(&now.naive_utc())
            .fix()
            .local_minus_utc()
            / 60;

        let next_backup_time = DateTime::from_timestamp(current.next_gc, 0)
            .map(|next| self.format_local(next.with_timezone(&tz)))
            .unwrap_or_default();

        let language = &*self.services.language;
        let rtl = language.direction() == TextDirection::Rtl;

        // Header panel
        self.services.template.assign_vars(into_vars(json!({
            "HEAD_TITLE": language.lang(MSG_SETTINGS),
            "HEAD_DESCRIPTION": language.lang(MSG_SETTINGS_EXPLAIN),
            "VERSION_NUMBER": EXTENSION_VERSION,
        })));

        self.services.template.assign_vars(into_vars(json!({
            "AUTO_DB_BACKUP_COPIES": current.copies,
            "AUTO_DB_BACKUP_GC": current.gc,
            "AUTO_DB_BACKUP_MAINTAIN_FREQ": current.maintain_freq,
            "NEXT_BACKUP_TIME": next_backup_time,
            "TIMEZONE": offset_minutes,
            "SERVER_TIMEZONE": self.panel.server_timezone.name(),
            "RTL_LANGUAGE": rtl,
            "S_AUTO_DB_BACKUP_ENABLE": current.enable,
            "S_AUTO_DB_BACKUP_OPTIMIZE": current.optimize,
            "U_ACTION": self.u_action,
        })));

        debug!(
            timezone = tz.name(),
            offset_minutes,
            filetype = %current.filetype,
            "Rendered backup settings page"
        );
    }

    /// Falls back to the default pattern when the configured one cannot render
    fn format_local(&self, instant: DateTime<Tz>) -> String {
        let mut rendered = String::new();
        if write!(rendered, "{}", instant.format(&self.panel.date_format)).is_ok() {
            return rendered;
        }

        warn!(
            date_format = %self.panel.date_format,
            fallback = DEFAULT_DATE_FORMAT,
            "Date format cannot be rendered, using fallback"
        );
        instant.format(DEFAULT_DATE_FORMAT).to_string()
    }

    fn user_timezone(&self) -> Tz {
        let name = self.services.user.timezone();
        name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(timezone = %name, "Unknown user timezone, using UTC");
            Tz::UTC
        })
    }

    fn back_link(&self) -> BackLink {
        BackLink {
            url: self.u_action.clone(),
            label: self.services.language.lang(MSG_BACK_TO_PREV),
        }
    }

    fn error(&self, kind: AdminErrorKind) -> AdminError {
        AdminError {
            kind,
            message: self.services.language.lang(kind.message_code()),
            back_link: self.back_link(),
        }
    }
}

fn into_vars(value: Value) -> TemplateVars {
    match value {
        Value::Object(map) => map,
        _ => TemplateVars::new(),
    }
}
