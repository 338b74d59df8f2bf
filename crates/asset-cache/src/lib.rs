//! Versioned offline cache for the tool's static assets.
//!
//! One cache *generation* holds every path from a fixed manifest, fetched
//! all-or-nothing at install time. Reads are cache-first with a network
//! fall-through that is never written back; activation deletes every
//! generation except the current one. The manifest is the single source
//! of truth for what lives in the cache.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

const GENERATION_PREFIX: &str = "gen-";
const STAGING_SUFFIX: &str = ".staging";
const INSTALL_MARKER: &str = ".installed";

/// Fixed list of asset paths making up one cache generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub paths: Vec<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse manifest '{}'", path.display()))
    }

    /// The built-in asset set shipped with the tool.
    pub fn builtin(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            paths: [
                "index.html",
                "style.css",
                "main.js",
                "image/Cesar.png",
                "image/Cesar_2.png",
                "ico/android-chrome-192x192.png",
                "ico/android-chrome-512x512.png",
                "ico/apple-touch-icon.png",
                "ico/favicon-16x16.png",
                "ico/favicon-32x32.png",
                "ico/favicon.ico",
                "site.webmanifest",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

/// Source of asset bytes for install-time precaching and cache misses.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

/// Fetches assets over HTTP relative to a base URL.
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self
            .base
            .join(path)
            .with_context(|| format!("invalid asset path '{path}'"))?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to fetch '{url}'"))?;
        if !response.status().is_success() {
            bail!("fetch of '{url}' returned status {}", response.status());
        }
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read body of '{url}'"))?;
        Ok(bytes.to_vec())
    }
}

/// Reads assets from a local directory. Used for offline development and
/// in tests, where it stands in for the network.
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetFetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let relative = validate_relative_path(path)?;
        let full = self.root.join(relative);
        tokio::fs::read(&full)
            .await
            .with_context(|| format!("failed to read asset '{}'", full.display()))
    }
}

/// On-disk cache of static assets, keyed by a version tag.
pub struct AssetCache {
    root: PathBuf,
    version: String,
}

impl AssetCache {
    /// Opens (and creates if needed) the cache root. Nothing is fetched
    /// yet; the current generation may or may not exist.
    pub fn open(root: impl Into<PathBuf>, version: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let version = version.into();
        if version.is_empty() || version.contains(['/', '\\']) {
            bail!("invalid cache version tag '{version}'");
        }
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create cache root '{}'", root.display()))?;
        Ok(Self { root, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn generation_dir(&self) -> PathBuf {
        self.root.join(format!("{GENERATION_PREFIX}{}", self.version))
    }

    fn staging_dir(&self) -> PathBuf {
        self.root
            .join(format!("{GENERATION_PREFIX}{}{STAGING_SUFFIX}", self.version))
    }

    /// Whether the current generation is fully installed.
    pub fn is_installed(&self) -> bool {
        self.generation_dir().join(INSTALL_MARKER).is_file()
    }

    /// Precaches every manifest path into the current generation.
    ///
    /// All-or-nothing: assets are fetched into a staging directory and the
    /// staging directory only becomes the generation once every path has
    /// been stored. Any failure removes the staging directory and leaves
    /// the cache exactly as it was. Returns the number of assets stored.
    pub async fn install(&self, manifest: &Manifest, fetcher: &dyn AssetFetcher) -> Result<usize> {
        let staging = self.staging_dir();
        if staging.exists() {
            fs::remove_dir_all(&staging).with_context(|| {
                format!("failed to clear stale staging dir '{}'", staging.display())
            })?;
        }
        fs::create_dir_all(&staging)
            .with_context(|| format!("failed to create staging dir '{}'", staging.display()))?;

        let result = self.populate_staging(&staging, manifest, fetcher).await;
        if let Err(err) = result {
            let _ = fs::remove_dir_all(&staging);
            return Err(err.context("asset cache install failed; staging discarded"));
        }

        fs::write(staging.join(INSTALL_MARKER), self.version.as_bytes())
            .context("failed to write install marker")?;

        let generation = self.generation_dir();
        if generation.exists() {
            fs::remove_dir_all(&generation).with_context(|| {
                format!("failed to replace generation '{}'", generation.display())
            })?;
        }
        fs::rename(&staging, &generation).with_context(|| {
            format!("failed to promote staging to '{}'", generation.display())
        })?;

        tracing::info!(
            version = %self.version,
            assets = manifest.paths.len(),
            "asset cache generation installed"
        );
        Ok(manifest.paths.len())
    }

    async fn populate_staging(
        &self,
        staging: &Path,
        manifest: &Manifest,
        fetcher: &dyn AssetFetcher,
    ) -> Result<()> {
        for path in &manifest.paths {
            let relative = validate_relative_path(path)?;
            let bytes = fetcher
                .fetch(path)
                .await
                .with_context(|| format!("manifest entry '{path}' could not be fetched"))?;
            let target = staging.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create asset dir '{}'", parent.display())
                })?;
            }
            fs::write(&target, &bytes)
                .with_context(|| format!("failed to store asset '{}'", target.display()))?;
            tracing::debug!(path, bytes = bytes.len(), "asset staged");
        }
        Ok(())
    }

    /// Deletes every cache generation other than the current one and
    /// returns the removed version tags. Refuses to run before the
    /// current generation is installed: install completion is the
    /// ordering barrier for activation.
    pub fn activate(&self) -> Result<Vec<String>> {
        if !self.is_installed() {
            bail!(
                "cannot activate version '{}' before its install completes",
                self.version
            );
        }

        let current = self.generation_dir();
        let mut removed = Vec::new();
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to list cache root '{}'", self.root.display()))?;
        for entry in entries {
            let entry = entry.context("failed to read cache root entry")?;
            let path = entry.path();
            if path == current || !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(tag) = name.strip_prefix(GENERATION_PREFIX) else {
                continue;
            };
            fs::remove_dir_all(&path).with_context(|| {
                format!("failed to delete stale generation '{}'", path.display())
            })?;
            removed.push(tag.trim_end_matches(STAGING_SUFFIX).to_string());
        }

        tracing::info!(version = %self.version, removed = removed.len(), "asset cache activated");
        Ok(removed)
    }

    /// Cache-first read of an installed asset. `None` on a miss or when
    /// the current generation is not installed.
    pub fn lookup(&self, path: &str) -> Option<Vec<u8>> {
        let relative = validate_relative_path(path).ok()?;
        if !self.is_installed() {
            return None;
        }
        fs::read(self.generation_dir().join(relative)).ok()
    }

    /// Serves `path` cache-first, falling through to `fetcher` on a miss.
    /// The fall-through bytes are returned to the caller but never stored:
    /// cache contents are fixed at install time. The flag reports whether
    /// the bytes came from the cache.
    pub async fn fetch(&self, path: &str, fetcher: &dyn AssetFetcher) -> Result<(Vec<u8>, bool)> {
        if let Some(bytes) = self.lookup(path) {
            return Ok((bytes, true));
        }
        let bytes = fetcher.fetch(path).await?;
        Ok((bytes, false))
    }
}

/// Rejects manifest entries that could escape the generation directory.
fn validate_relative_path(path: &str) -> Result<&Path> {
    if path.is_empty() {
        bail!("empty asset path");
    }
    let relative = Path::new(path);
    for component in relative.components() {
        match component {
            Component::Normal(_) => {}
            _ => bail!("asset path '{path}' must be a plain relative path"),
        }
    }
    Ok(relative)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
