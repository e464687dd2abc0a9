use std::{fs, path::Path, time::Duration};

use nav_core::{KeyBindings, NavigatorOptions, TreeOptions};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "navigator.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    pub tree: TreeOptions,
    pub fetch_timeout_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            tree: TreeOptions::default(),
            fetch_timeout_ms: nav_core::DEFAULT_FETCH_TIMEOUT.as_millis() as u64,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            tree: self.tree,
            keys: self.keys.clone(),
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }
}

/// Reads the settings file, then applies `APP__*` environment overrides.
///
/// Problems with the file are reported through the returned warnings so they
/// can be logged once the subscriber is installed; defaults are used instead.
pub fn load_settings(path: &Path) -> (Settings, Vec<String>) {
    let mut warnings = Vec::new();
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warnings.push(format!("ignoring invalid {}: {err}", path.display()));
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok(), &mut warnings);

    for name in settings.keys.duplicate_bindings() {
        warnings.push(format!("key {name} is bound to more than one action"));
    }
    (settings, warnings)
}

fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
    warnings: &mut Vec<String>,
) {
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__FETCH_TIMEOUT_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.fetch_timeout_ms = parsed,
            Err(_) => warnings.push(format!("ignoring APP__FETCH_TIMEOUT_MS={v}")),
        }
    }
    if let Some(v) = lookup("APP__AUTO_EXPAND_FOLDERS") {
        match v.parse::<bool>() {
            Ok(parsed) => settings.tree.auto_expand_folders = parsed,
            Err(_) => warnings.push(format!("ignoring APP__AUTO_EXPAND_FOLDERS={v}")),
        }
    }
}

pub fn log_warnings(warnings: &[String]) {
    for message in warnings {
        warn!("{message}");
    }
}
