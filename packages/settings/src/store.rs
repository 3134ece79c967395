// ABOUTME: Reading and writing the backup settings record in the host config store
// ABOUTME: String encoding of the seven keys, defaults installation and an in-memory store

use autobackup_core::constants::{
    CONFIG_COPIES, CONFIG_ENABLE, CONFIG_FILETYPE, CONFIG_GC, CONFIG_MAINTAIN_FREQ,
    CONFIG_NEXT_GC, CONFIG_OPTIMIZE,
};
use autobackup_core::{BackupSettings, Filetype};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::services::ConfigStore;

/// In-memory configuration store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfig {
    values: BTreeMap<String, String>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Backup settings view over a host config store
pub struct SettingsStore<'a> {
    config: &'a mut dyn ConfigStore,
}

impl<'a> SettingsStore<'a> {
    pub fn new(config: &'a mut dyn ConfigStore) -> Self {
        Self { config }
    }

    /// Read the record; missing or malformed keys fall back to their defaults
    pub fn load(&self) -> BackupSettings {
        let defaults = BackupSettings::default();

        BackupSettings {
            enable: self.read_flag(CONFIG_ENABLE, defaults.enable),
            copies: self.read(CONFIG_COPIES, defaults.copies),
            filetype: self.read::<Filetype>(CONFIG_FILETYPE, defaults.filetype),
            gc: self.read(CONFIG_GC, defaults.gc),
            maintain_freq: self.read(CONFIG_MAINTAIN_FREQ, defaults.maintain_freq),
            next_gc: self.read(CONFIG_NEXT_GC, defaults.next_gc),
            optimize: self.read_flag(CONFIG_OPTIMIZE, defaults.optimize),
        }
    }

    /// Write all seven keys
    pub fn save(&mut self, settings: &BackupSettings) {
        self.config.set(CONFIG_ENABLE, encode_flag(settings.enable));
        self.config.set(CONFIG_COPIES, &settings.copies.to_string());
        self.config.set(CONFIG_FILETYPE, settings.filetype.as_str());
        self.config.set(CONFIG_GC, &settings.gc.to_string());
        self.config
            .set(CONFIG_MAINTAIN_FREQ, &settings.maintain_freq.to_string());
        self.config.set(CONFIG_NEXT_GC, &settings.next_gc.to_string());
        self.config.set(CONFIG_OPTIMIZE, encode_flag(settings.optimize));

        debug!(
            enable = settings.enable,
            copies = settings.copies,
            filetype = %settings.filetype,
            next_gc = settings.next_gc,
            "Saved backup settings"
        );
    }

    /// Write defaults for keys the store does not hold yet, returning how many were added
    pub fn install_defaults(&mut self) -> usize {
        let defaults = BackupSettings::default();
        let entries = [
            (CONFIG_ENABLE, encode_flag(defaults.enable).to_string()),
            (CONFIG_COPIES, defaults.copies.to_string()),
            (CONFIG_FILETYPE, defaults.filetype.as_str().to_string()),
            (CONFIG_GC, defaults.gc.to_string()),
            (CONFIG_MAINTAIN_FREQ, defaults.maintain_freq.to_string()),
            (CONFIG_NEXT_GC, defaults.next_gc.to_string()),
            (CONFIG_OPTIMIZE, encode_flag(defaults.optimize).to_string()),
        ];

        let mut added = 0;
        for (key, value) in entries {
            if self.config.get(key).is_none() {
                self.config.set(key, &value);
                added += 1;
            }
        }

        if added > 0 {
            debug!(added, "Installed default backup settings");
        }
        added
    }

    fn read<T: FromStr>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.config.get(key) else {
            return default;
        };

        match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key = %key, value = %raw, "Malformed config value, using default");
                default
            }
        }
    }

    /// Flags are stored as integers; any non-zero value is set
    fn read_flag(&self, key: &str, default: bool) -> bool {
        match self.config.get(key) {
            Some(raw) => match raw.trim() {
                "true" => true,
                "false" | "" => false,
                other => match other.parse::<i64>() {
                    Ok(value) => value != 0,
                    Err(_) => {
                        warn!(key = %key, value = %raw, "Malformed config flag, using default");
                        default
                    }
                },
            },
            None => default,
        }
    }
}

fn encode_flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
