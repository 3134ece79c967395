// ABOUTME: Tests for the backup settings controller
// ABOUTME: Rendering, filetype rows, submit validation and all-or-nothing persistence

#[cfg(test)]
mod tests {
    use crate::controller::{AdminController, AdminServices};
    use crate::error::{AdminError, AdminErrorKind};
    use crate::lang::EnglishCatalogue;
    use crate::services::{
        Language, MockClock, MockCompressionProbe, MockFormKeyGuard, TemplateVars,
    };
    use crate::store::{MemoryConfig, SettingsStore};
    use crate::test_utils::{
        FixedClock, FormRequest, RecordingAuditLog, RecordingTemplate, StaticCodecs,
        StaticFormKey, StaticUser,
    };
    use crate::types::Outcome;
    use autobackup_config::PanelConfig;
    use autobackup_core::constants::{
        BLOCK_FILETYPES, CONFIG_KEYS, EXTENSION_VERSION, FORM_KEY, LOG_SETTINGS_CHANGED,
    };
    use autobackup_core::{BackupSettings, Filetype};
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const PAGE_URL: &str = "/adm/index.php?i=-autodbbackup-acp-main_module&mode=manage";

    // 2026-10-16 12:00:00 UTC
    const NOW: i64 = 1_792_152_000;
    // 2030-01-01 00:00:00 UTC
    const NEW_YEAR_2030: i64 = 1_893_456_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    struct Harness {
        config: MemoryConfig,
        request: FormRequest,
        template: RecordingTemplate,
        user: StaticUser,
        log: RecordingAuditLog,
        language: EnglishCatalogue,
        form_key: StaticFormKey,
        codecs: StaticCodecs,
        clock: FixedClock,
        panel: PanelConfig,
    }

    impl Harness {
        fn new(request: FormRequest) -> Self {
            let mut config = MemoryConfig::new();
            SettingsStore::new(&mut config).install_defaults();

            Self {
                config,
                request,
                template: RecordingTemplate::default(),
                user: StaticUser::admin("UTC"),
                log: RecordingAuditLog::default(),
                language: EnglishCatalogue::new(),
                form_key: StaticFormKey::valid(),
                codecs: StaticCodecs::all(),
                clock: FixedClock(now()),
                panel: PanelConfig::default(),
            }
        }

        fn run(&mut self) -> Result<Outcome, AdminError> {
            let services = AdminServices {
                config: &mut self.config,
                request: &self.request,
                template: &mut self.template,
                user: &self.user,
                log: &mut self.log,
                language: &mut self.language,
                form_key: &mut self.form_key,
                codecs: &self.codecs,
                clock: &self.clock,
            };
            let mut controller = AdminController::new(services, self.panel.clone());
            controller.set_page_url(PAGE_URL);
            controller.display_options()
        }

        fn settings(&mut self) -> BackupSettings {
            SettingsStore::new(&mut self.config).load()
        }

        fn store_settings(&mut self, settings: &BackupSettings) {
            SettingsStore::new(&mut self.config).save(settings);
        }
    }

    fn example_submission(time: &str) -> FormRequest {
        FormRequest::submitted()
            .field("auto_db_time", time)
            .field("auto_db_backup_enable", 1)
            .field("auto_db_backup_copies", 5)
            .field("auto_db_backup_filetype", "gzip")
            .field("auto_db_backup_gc", 1)
            .field("auto_db_backup_maintain_freq", 7)
            .field("auto_db_backup_optimize", 1)
    }

    fn row_values(rows: &[&TemplateVars], field: &str) -> Vec<serde_json::Value> {
        rows.iter()
            .map(|row| row.get(field).cloned().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_valid_submission_persists_all_fields() {
        let mut harness = Harness::new(example_submission("2030-01-01 00:00"));

        let outcome = harness.run().unwrap();

        assert_eq!(
            harness.settings(),
            BackupSettings {
                enable: true,
                copies: 5,
                filetype: Filetype::Gzip,
                gc: 1,
                maintain_freq: 7,
                next_gc: NEW_YEAR_2030,
                optimize: true,
            }
        );

        assert_eq!(harness.log.entries.len(), 1);
        let entry = &harness.log.entries[0];
        assert_eq!(entry.operation, "admin");
        assert_eq!(entry.user_id, harness.user.id);
        assert_eq!(entry.ip, harness.user.ip);
        assert_eq!(entry.message_code, LOG_SETTINGS_CHANGED);

        match outcome {
            Outcome::Notice(notice) => {
                assert_eq!(notice.message, "Auto database backup settings changed.");
                assert_eq!(notice.back_link.url, PAGE_URL);
                assert_eq!(notice.back_link.label, "Back to previous page");
            }
            other => panic!("Expected notice, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_is_read_in_user_timezone() {
        let mut harness = Harness::new(example_submission("2030-01-01 00:00"));
        harness.user = StaticUser::admin("Europe/Madrid");

        harness.run().unwrap();

        assert_eq!(harness.settings().next_gc, NEW_YEAR_2030 - 3600);
    }

    #[test]
    fn test_unparseable_date_changes_nothing() {
        let mut harness = Harness::new(example_submission("not-a-date"));
        let before = harness.config.clone();

        let err = harness.run().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::InvalidSchedule);
        assert_eq!(
            err.message,
            "The date and time entered could not be understood."
        );
        assert_eq!(err.back_link.url, PAGE_URL);
        assert_eq!(harness.config, before);
        assert!(harness.log.entries.is_empty());
    }

    #[test]
    fn test_empty_date_is_invalid_even_when_disabled() {
        let mut harness = Harness::new(example_submission("").field("auto_db_backup_enable", 0));
        let before = harness.config.clone();

        let err = harness.run().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::InvalidSchedule);
        assert_eq!(harness.config, before);
    }

    #[test]
    fn test_enabling_with_past_date_is_rejected() {
        let mut harness = Harness::new(example_submission("2020-01-01 00:00"));
        let before = harness.config.clone();

        let err = harness.run().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::ScheduleNotInFuture);
        assert_eq!(err.message, "The next backup time must be in the future.");
        assert_eq!(harness.config, before);
        assert!(harness.log.entries.is_empty());
    }

    #[test]
    fn test_enabling_with_current_time_is_rejected() {
        let mut harness = Harness::new(example_submission(&format!("@{}", NOW)));
        let before = harness.config.clone();

        let err = harness.run().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::ScheduleNotInFuture);
        assert_eq!(harness.config, before);
    }

    #[test]
    fn test_one_second_ahead_is_accepted() {
        let mut harness = Harness::new(example_submission(&format!("@{}", NOW + 1)));

        assert!(harness.run().is_ok());
        assert_eq!(harness.settings().next_gc, NOW + 1);
    }

    #[test]
    fn test_disabled_backup_accepts_past_date() {
        let mut harness = Harness::new(
            example_submission("2020-01-01 00:00").field("auto_db_backup_enable", 0),
        );

        harness.run().unwrap();

        let settings = harness.settings();
        assert!(!settings.enable);
        assert_eq!(settings.next_gc, 1_577_836_800);
        assert_eq!(harness.log.entries.len(), 1);
    }

    #[test]
    fn test_invalid_form_key_changes_nothing() {
        let mut harness = Harness::new(example_submission("2030-01-01 00:00"));
        harness.form_key = StaticFormKey::invalid();
        let before = harness.config.clone();

        let err = harness.run().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::InvalidSubmission);
        assert_eq!(
            err.message,
            "The submitted form was invalid. Try submitting again."
        );
        assert_eq!(harness.config, before);
        assert!(harness.log.entries.is_empty());
    }

    #[test]
    fn test_invalid_form_key_wins_over_bad_date() {
        let mut harness = Harness::new(example_submission("not-a-date"));
        harness.form_key = StaticFormKey::invalid();

        let err = harness.run().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::InvalidSubmission);
    }

    #[test]
    fn test_form_key_is_registered_on_every_request() {
        let mut harness = Harness::new(FormRequest::new());
        harness.run().unwrap();
        assert_eq!(harness.form_key.registered, vec![FORM_KEY.to_string()]);
    }

    #[test]
    fn test_negative_counters_clamp_to_zero() {
        let mut harness = Harness::new(
            example_submission("2030-01-01 00:00")
                .field("auto_db_backup_copies", -4)
                .field("auto_db_backup_gc", -1)
                .field("auto_db_backup_maintain_freq", "abc"),
        );

        harness.run().unwrap();

        let settings = harness.settings();
        assert_eq!(settings.copies, 0);
        assert_eq!(settings.gc, 0);
        assert_eq!(settings.maintain_freq, 0);
    }

    #[test]
    fn test_unavailable_filetype_is_stored_as_text() {
        let mut harness = Harness::new(
            example_submission("2030-01-01 00:00").field("auto_db_backup_filetype", "bzip2"),
        );
        harness.codecs = StaticCodecs::only(&[Filetype::Text, Filetype::Gzip]);

        harness.run().unwrap();

        assert_eq!(harness.settings().filetype, Filetype::Text);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut harness = Harness::new(
            FormRequest::submitted().field("auto_db_time", "2030-01-01 00:00"),
        );

        harness.run().unwrap();

        assert_eq!(
            harness.settings(),
            BackupSettings {
                enable: false,
                copies: 0,
                filetype: Filetype::Text,
                gc: 0,
                maintain_freq: 0,
                next_gc: NEW_YEAR_2030,
                optimize: false,
            }
        );
    }

    #[test]
    fn test_fields_without_submit_flag_only_render() {
        let fields_only = FormRequest::new()
            .field("auto_db_time", "2030-01-01 00:00")
            .field("auto_db_backup_enable", 1)
            .field("auto_db_backup_copies", 9);

        let mut harness = Harness::new(fields_only);
        let before = harness.config.clone();

        assert_eq!(harness.run().unwrap(), Outcome::Rendered);
        assert_eq!(harness.config, before);
        assert!(harness.log.entries.is_empty());
    }

    #[test]
    fn test_render_assigns_current_settings() {
        let mut harness = Harness::new(FormRequest::new());
        harness.user = StaticUser::admin("Europe/Madrid");
        harness.store_settings(&BackupSettings {
            enable: true,
            copies: 8,
            filetype: Filetype::Gzip,
            gc: 2,
            maintain_freq: 3,
            next_gc: NEW_YEAR_2030,
            optimize: true,
        });

        assert_eq!(harness.run().unwrap(), Outcome::Rendered);

        let template = &harness.template;
        assert_eq!(
            template.var("HEAD_TITLE"),
            Some(&json!("Auto database backup settings"))
        );
        assert_eq!(template.var("VERSION_NUMBER"), Some(&json!(EXTENSION_VERSION)));
        assert_eq!(template.var("AUTO_DB_BACKUP_COPIES"), Some(&json!(8)));
        assert_eq!(template.var("AUTO_DB_BACKUP_GC"), Some(&json!(2)));
        assert_eq!(template.var("AUTO_DB_BACKUP_MAINTAIN_FREQ"), Some(&json!(3)));
        assert_eq!(
            template.var("NEXT_BACKUP_TIME"),
            Some(&json!("01-01-2030 01:00"))
        );
        // Madrid is on CEST (UTC+2) on 2026-10-16
        assert_eq!(template.var("TIMEZONE"), Some(&json!(120)));
        assert_eq!(template.var("SERVER_TIMEZONE"), Some(&json!("UTC")));
        assert_eq!(template.var("RTL_LANGUAGE"), Some(&json!(false)));
        assert_eq!(template.var("S_AUTO_DB_BACKUP_ENABLE"), Some(&json!(true)));
        assert_eq!(template.var("S_AUTO_DB_BACKUP_OPTIMIZE"), Some(&json!(true)));
        assert_eq!(template.var("U_ACTION"), Some(&json!(PAGE_URL)));
    }

    #[test]
    fn test_render_with_unknown_timezone_uses_utc() {
        let mut harness = Harness::new(FormRequest::new());
        harness.user = StaticUser::admin("Not/AZone");

        harness.run().unwrap();

        assert_eq!(harness.template.var("TIMEZONE"), Some(&json!(0)));
    }

    #[test]
    fn test_unrenderable_date_format_falls_back_to_default() {
        let mut harness = Harness::new(FormRequest::new());
        harness.panel = PanelConfig {
            date_format: "%d-%Q".to_string(),
            ..PanelConfig::default()
        };
        harness.store_settings(&BackupSettings {
            next_gc: NEW_YEAR_2030,
            ..BackupSettings::default()
        });

        assert_eq!(harness.run().unwrap(), Outcome::Rendered);
        assert_eq!(
            harness.template.var("NEXT_BACKUP_TIME"),
            Some(&json!("01-01-2030 00:00"))
        );
    }

    #[test]
    fn test_rendered_time_round_trips_through_submit() {
        let scheduled = NEW_YEAR_2030 + 45 * 60;
        let mut harness = Harness::new(FormRequest::new());
        harness.user = StaticUser::admin("America/New_York");
        harness.store_settings(&BackupSettings {
            next_gc: scheduled,
            ..BackupSettings::default()
        });
        harness.run().unwrap();

        let rendered = harness
            .template
            .var("NEXT_BACKUP_TIME")
            .and_then(|value| value.as_str())
            .unwrap()
            .to_string();

        harness.request = example_submission(&rendered);
        harness.run().unwrap();

        assert_eq!(harness.settings().next_gc, scheduled);
    }

    #[test]
    fn test_filetype_rows_mark_configured_filetype() {
        let mut harness = Harness::new(FormRequest::new());
        harness.store_settings(&BackupSettings {
            filetype: Filetype::Bzip2,
            ..BackupSettings::default()
        });

        harness.run().unwrap();

        let rows = harness.template.rows(BLOCK_FILETYPES);
        assert_eq!(
            row_values(&rows, "FILETYPE"),
            vec![json!("gzip"), json!("bzip2"), json!("text")]
        );
        assert_eq!(
            row_values(&rows, "S_CHECKED"),
            vec![json!(false), json!(true), json!(false)]
        );
        assert_eq!(row_values(&rows, "VALUE")[2], json!("Text"));
    }

    #[test]
    fn test_filetype_rows_follow_available_codecs() {
        let mut harness = Harness::new(FormRequest::new());
        harness.codecs = StaticCodecs::only(&[Filetype::Gzip]);

        harness.run().unwrap();

        let rows = harness.template.rows(BLOCK_FILETYPES);
        assert_eq!(
            row_values(&rows, "FILETYPE"),
            vec![json!("gzip"), json!("text")]
        );
        assert_eq!(
            row_values(&rows, "S_CHECKED"),
            vec![json!(false), json!(true)]
        );
    }

    #[test]
    fn test_filetype_rows_emitted_on_submit() {
        let mut harness = Harness::new(example_submission("2030-01-01 00:00"));
        harness.codecs = StaticCodecs::only(&[Filetype::Text]);

        harness.run().unwrap();

        assert_eq!(harness.template.rows(BLOCK_FILETYPES).len(), 1);
    }

    #[test]
    fn test_settings_record_covers_every_key() {
        let mut harness = Harness::new(example_submission("2030-01-01 00:00"));
        harness.config = MemoryConfig::new();

        harness.run().unwrap();

        assert_eq!(harness.config.len(), CONFIG_KEYS.len());
    }

    struct RtlLanguage(EnglishCatalogue);

    impl Language for RtlLanguage {
        fn add_lang(&mut self, bundle: &str, extension: &str) {
            self.0.add_lang(bundle, extension);
        }

        fn lang(&self, key: &str) -> String {
            if key == "DIRECTION" {
                "rtl".to_string()
            } else {
                self.0.lang(key)
            }
        }

        fn lang_with(&self, key: &str, param: &str) -> String {
            self.0.lang_with(key, param)
        }
    }

    #[test]
    fn test_rtl_language_sets_layout_flag() {
        let mut harness = Harness::new(FormRequest::new());
        let mut language = RtlLanguage(EnglishCatalogue::new());

        let services = AdminServices {
            config: &mut harness.config,
            request: &harness.request,
            template: &mut harness.template,
            user: &harness.user,
            log: &mut harness.log,
            language: &mut language,
            form_key: &mut harness.form_key,
            codecs: &harness.codecs,
            clock: &harness.clock,
        };
        AdminController::new(services, PanelConfig::default())
            .display_options()
            .unwrap();

        assert_eq!(harness.template.var("RTL_LANGUAGE"), Some(&json!(true)));
        assert!(language.0.is_loaded("acp_autobackup"));
        assert!(language.0.is_loaded("date_time_picker"));
    }

    #[test]
    fn test_rejected_form_key_stops_before_reading_clock() {
        let mut harness = Harness::new(example_submission("2030-01-01 00:00"));
        let before = harness.config.clone();

        let mut form_key = MockFormKeyGuard::new();
        form_key
            .expect_add_form_key()
            .withf(|name| name == FORM_KEY)
            .times(1)
            .return_const(());
        form_key
            .expect_check_form_key()
            .withf(|name| name == FORM_KEY)
            .times(1)
            .return_const(false);

        let mut codecs = MockCompressionProbe::new();
        codecs
            .expect_available()
            .times(1)
            .returning(|| Filetype::ALL.into_iter().collect());

        let mut clock = MockClock::new();
        clock.expect_now().times(0);

        let services = AdminServices {
            config: &mut harness.config,
            request: &harness.request,
            template: &mut harness.template,
            user: &harness.user,
            log: &mut harness.log,
            language: &mut harness.language,
            form_key: &mut form_key,
            codecs: &codecs,
            clock: &clock,
        };
        let mut controller = AdminController::new(services, PanelConfig::default());
        controller.set_page_url(PAGE_URL);
        assert_eq!(controller.page_url(), PAGE_URL);

        let err = controller.display_options().unwrap_err();

        assert_eq!(err.kind, AdminErrorKind::InvalidSubmission);
        assert_eq!(harness.config, before);
    }

    #[test]
    fn test_probe_queried_once_per_render() {
        let mut harness = Harness::new(FormRequest::new());

        let mut codecs = MockCompressionProbe::new();
        codecs
            .expect_available()
            .times(1)
            .returning(|| [Filetype::Text].into_iter().collect());

        let services = AdminServices {
            config: &mut harness.config,
            request: &harness.request,
            template: &mut harness.template,
            user: &harness.user,
            log: &mut harness.log,
            language: &mut harness.language,
            form_key: &mut harness.form_key,
            codecs: &codecs,
            clock: &harness.clock,
        };
        AdminController::new(services, PanelConfig::default())
            .display_options()
            .unwrap();
    }
}
