use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Runtime settings for the disk tool. Defaults are overlaid by a flat
/// `disk.toml` next to the working directory, then by `DISK__*`
/// environment variables, then by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Where asset bytes come from: an `http(s)://` base URL, or a local
    /// directory path for offline development.
    pub assets_source: String,
    /// Cache root directory. Resolved per-user when unset.
    pub cache_root: Option<PathBuf>,
    /// Version tag naming the current cache generation.
    pub cache_version: String,
    /// Manifest JSON path; the built-in asset list is used when unset.
    pub manifest_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_source: "assets".into(),
            cache_root: None,
            cache_version: "v1".into(),
            manifest_path: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("disk.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings);

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("assets_source") {
            settings.assets_source = v.clone();
        }
        if let Some(v) = file_cfg.get("cache_root") {
            settings.cache_root = Some(PathBuf::from(v));
        }
        if let Some(v) = file_cfg.get("cache_version") {
            settings.cache_version = v.clone();
        }
        if let Some(v) = file_cfg.get("manifest_path") {
            settings.manifest_path = Some(PathBuf::from(v));
        }
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(v) = std::env::var("DISK__ASSETS_SOURCE") {
        settings.assets_source = v;
    }
    if let Ok(v) = std::env::var("DISK__CACHE_ROOT") {
        settings.cache_root = Some(PathBuf::from(v));
    }
    if let Ok(v) = std::env::var("DISK__CACHE_VERSION") {
        settings.cache_version = v;
    }
    if let Ok(v) = std::env::var("DISK__MANIFEST_PATH") {
        settings.manifest_path = Some(PathBuf::from(v));
    }
}

impl Settings {
    /// The directory holding cache generations for this user.
    pub fn resolve_cache_root(&self) -> anyhow::Result<PathBuf> {
        if let Some(root) = &self.cache_root {
            return Ok(root.clone());
        }
        let base = dirs::cache_dir().context("unable to resolve per-user cache dir")?;
        Ok(base.join("cipher-disk"))
    }
}
