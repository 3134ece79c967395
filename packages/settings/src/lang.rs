// ABOUTME: English message catalogue for the backup settings page
// ABOUTME: Common host messages plus the two extension bundles, resolved once registered

use autobackup_core::constants::{LANG_BUNDLE_ACP, LANG_BUNDLE_DATE_PICKER};
use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::debug;

use crate::services::Language;

type Messages = HashMap<&'static str, &'static str>;

lazy_static! {
    /// Host messages available without registering a bundle
    static ref COMMON: Messages = HashMap::from([
        ("DIRECTION", "ltr"),
        ("FORM_INVALID", "The submitted form was invalid. Try submitting again."),
        ("BACK_TO_PREV", "Back to previous page"),
    ]);

    static ref BUNDLES: HashMap<&'static str, Messages> = HashMap::from([
        (
            LANG_BUNDLE_ACP,
            HashMap::from([
                ("AUTO_DB_BACKUP_SETTINGS", "Auto database backup settings"),
                (
                    "AUTO_DB_BACKUP_SETTINGS_EXPLAIN",
                    "Here you can set the schedule, retention and format of the automatic database backups.",
                ),
                ("AUTO_DB_BACKUP_SETTINGS_CHANGED", "Auto database backup settings changed."),
                (
                    "AUTO_DB_BACKUP_TIME_ERROR",
                    "The next backup time must be in the future.",
                ),
                ("LOG_AUTO_DB_BACKUP_SETTINGS", "<strong>Auto database backup settings updated</strong>"),
            ]),
        ),
        (
            LANG_BUNDLE_DATE_PICKER,
            HashMap::from([(
                "DATE_FORMAT_ERROR",
                "The date and time entered could not be understood.",
            )]),
        ),
    ]);

    static ref NESTED: HashMap<&'static str, Messages> = HashMap::from([(
        "FILETYPE",
        HashMap::from([("gzip", "gzip"), ("bzip2", "bzip2"), ("text", "Text")]),
    )]);
}

/// English translations; unknown keys resolve to the key itself
#[derive(Debug, Clone, Default)]
pub struct EnglishCatalogue {
    bundles: Vec<String>,
}

impl EnglishCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, bundle: &str) -> bool {
        self.bundles.iter().any(|loaded| loaded == bundle)
    }
}

impl Language for EnglishCatalogue {
    fn add_lang(&mut self, bundle: &str, extension: &str) {
        if self.is_loaded(bundle) {
            return;
        }
        debug!(bundle = %bundle, extension = %extension, "Registered language bundle");
        self.bundles.push(bundle.to_string());
    }

    fn lang(&self, key: &str) -> String {
        let registered = self
            .bundles
            .iter()
            .filter_map(|bundle| BUNDLES.get(bundle.as_str()));

        std::iter::once(&*COMMON)
            .chain(registered)
            .find_map(|messages| messages.get(key))
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    fn lang_with(&self, key: &str, param: &str) -> String {
        NESTED
            .get(key)
            .and_then(|messages| messages.get(param))
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
