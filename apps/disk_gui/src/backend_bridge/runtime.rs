//! Asset cache worker: a background thread with its own tokio runtime,
//! fed commands over a bounded channel. It shares no memory with the UI;
//! everything flows back as [`UiEvent`]s.

use std::thread;

use asset_cache::{AssetCache, AssetFetcher, DirFetcher, HttpFetcher, Manifest};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::WorkerCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Whether the configured asset source names a network origin. Anything
/// that is not an `http(s)` URL is treated as a local directory.
fn is_network_source(assets_source: &str) -> Option<Url> {
    match Url::parse(assets_source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        _ => None,
    }
}

fn fetcher_for(assets_source: &str) -> Box<dyn AssetFetcher> {
    match is_network_source(assets_source) {
        Some(url) => Box::new(HttpFetcher::new(url)),
        None => Box::new(DirFetcher::new(assets_source)),
    }
}

pub fn launch(settings: Settings, cmd_rx: Receiver<WorkerCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Asset cache worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::WorkerStartup,
                    format!("worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build cache worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let cache_root = match settings.resolve_cache_root() {
                Ok(root) => root,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::WorkerStartup,
                        format!("worker startup failure: {err:#}"),
                    )));
                    tracing::error!("unable to resolve cache root: {err:#}");
                    return;
                }
            };

            let cache = match AssetCache::open(&cache_root, &settings.cache_version) {
                Ok(cache) => cache,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::WorkerStartup,
                        format!("worker startup failure: {err:#}"),
                    )));
                    tracing::error!("unable to open asset cache at '{}': {err:#}", cache_root.display());
                    return;
                }
            };

            let manifest = match &settings.manifest_path {
                Some(path) => match Manifest::load(path) {
                    Ok(manifest) => manifest,
                    Err(err) => {
                        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                            UiErrorContext::WorkerStartup,
                            format!("worker startup failure: {err:#}"),
                        )));
                        tracing::error!("unable to load manifest: {err:#}");
                        return;
                    }
                },
                None => Manifest::builtin(&settings.cache_version),
            };

            let fetcher = fetcher_for(&settings.assets_source);
            let _ = ui_tx.try_send(UiEvent::Info("Asset cache worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    WorkerCommand::Install => {
                        tracing::info!(version = %cache.version(), "worker: install");
                        match cache.install(&manifest, fetcher.as_ref()).await {
                            Ok(_) => {
                                let _ = ui_tx.try_send(UiEvent::CacheInstalled {
                                    assets: manifest.paths.clone(),
                                });
                            }
                            Err(err) => {
                                tracing::error!("worker: install failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Install,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    WorkerCommand::Activate => {
                        tracing::info!(version = %cache.version(), "worker: activate");
                        match cache.activate() {
                            Ok(removed) => {
                                let _ = ui_tx.try_send(UiEvent::CacheActivated { removed });
                            }
                            Err(err) => {
                                tracing::error!("worker: activate failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Activate,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    WorkerCommand::Probe { path } => {
                        tracing::info!(path, "worker: probe");
                        match cache.fetch(&path, fetcher.as_ref()).await {
                            Ok((bytes, from_cache)) => {
                                let _ = ui_tx.try_send(UiEvent::ProbeLoaded {
                                    path,
                                    bytes: bytes.len(),
                                    from_cache,
                                });
                            }
                            Err(err) => {
                                tracing::error!(path, "worker: probe failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Probe,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}
