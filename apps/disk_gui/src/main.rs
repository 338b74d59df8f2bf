mod backend_bridge;
mod config;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::WorkerCommand;
use crate::backend_bridge::runtime;
use crate::config::{load_settings, Settings};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_worker_command;
use crate::ui::CipherDiskApp;

/// Interactive cipher disk with an offline asset cache.
#[derive(Debug, Parser)]
#[command(name = "disk_gui", version)]
struct Args {
    /// Asset source: an http(s) base URL or a local directory.
    #[arg(long)]
    assets_source: Option<String>,
    /// Cache root directory (defaults to the per-user cache dir).
    #[arg(long)]
    cache_root: Option<PathBuf>,
    /// Version tag for the cache generation to install.
    #[arg(long)]
    cache_version: Option<String>,
    /// Manifest JSON path (defaults to the built-in asset list).
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn apply_cli_overrides(settings: &mut Settings, args: Args) {
    if let Some(v) = args.assets_source {
        settings.assets_source = v;
    }
    if let Some(v) = args.cache_root {
        settings.cache_root = Some(v);
    }
    if let Some(v) = args.cache_version {
        settings.cache_version = v;
    }
    if let Some(v) = args.manifest {
        settings.manifest_path = Some(v);
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = load_settings();
    apply_cli_overrides(&mut settings, args);
    tracing::info!(
        assets_source = %settings.assets_source,
        cache_version = %settings.cache_version,
        "starting cipher disk"
    );

    let (cmd_tx, cmd_rx) = bounded::<WorkerCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(settings, cmd_rx, ui_tx);

    // Precache on startup so the tool works offline from the first run.
    let mut startup_status = String::new();
    dispatch_worker_command(&cmd_tx, WorkerCommand::Install, &mut startup_status);
    if !startup_status.is_empty() {
        tracing::warn!("initial install not queued: {startup_status}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Cipher Disk")
            .with_inner_size([960.0, 600.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Cipher Disk",
        options,
        Box::new(|_cc| Ok(Box::new(CipherDiskApp::new(cmd_tx, ui_rx)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_replace_loaded_settings() {
        let mut settings = Settings::default();
        apply_cli_overrides(
            &mut settings,
            Args {
                assets_source: Some("https://disk.example.org/".to_string()),
                cache_root: None,
                cache_version: Some("v9".to_string()),
                manifest: Some(PathBuf::from("manifest.json")),
            },
        );
        assert_eq!(settings.assets_source, "https://disk.example.org/");
        assert_eq!(settings.cache_version, "v9");
        assert_eq!(settings.manifest_path, Some(PathBuf::from("manifest.json")));
        assert!(settings.cache_root.is_none());
    }

    #[test]
    fn absent_cli_flags_leave_settings_untouched() {
        let mut settings = Settings::default();
        apply_cli_overrides(
            &mut settings,
            Args {
                assets_source: None,
                cache_root: None,
                cache_version: None,
                manifest: None,
            },
        );
        assert_eq!(settings.assets_source, "assets");
        assert_eq!(settings.cache_version, "v1");
    }
}
