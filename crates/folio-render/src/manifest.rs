//! Client build manifest lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

/// Manifest key of the production client entry.
pub const CLIENT_ENTRY_KEY: &str = "entry-client-prod.ts";

/// One emitted chunk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestChunk {
    /// Output path relative to the asset base.
    pub file: String,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default, rename = "isEntry")]
    pub is_entry: bool,
}

/// Errors reading a build manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read build manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid build manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("build manifest has no entry {key:?}")]
    MissingEntry { key: String },
}

/// Mapping of source entry names to emitted chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BuildManifest {
    chunks: HashMap<String, ManifestChunk>,
}

impl BuildManifest {
    /// Parse manifest JSON; `path` is only used in errors.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(json).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a manifest file.
    pub async fn load(path: &Path) -> Result<Self, ManifestError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ManifestError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(path, &json)
    }

    pub fn chunk(&self, key: &str) -> Option<&ManifestChunk> {
        self.chunks.get(key)
    }

    /// Output file of an entry.
    pub fn entry_file(&self, key: &str) -> Result<&str, ManifestError> {
        self.chunk(key)
            .map(|chunk| chunk.file.as_str())
            .ok_or_else(|| ManifestError::MissingEntry {
                key: key.to_string(),
            })
    }

    /// URL of the client entry script under `asset_base`.
    pub fn client_entry_url(&self, asset_base: &str) -> Result<String, ManifestError> {
        let file = self.entry_file(CLIENT_ENTRY_KEY)?;
        Ok(join_asset(asset_base, file))
    }
}

fn join_asset(base: &str, file: &str) -> String {
    if base.is_empty() {
        return file.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}

/// Manifests keyed by path, each read once and then shared.
#[derive(Debug, Default)]
pub struct ManifestCache {
    manifests: RwLock<HashMap<PathBuf, Arc<BuildManifest>>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The manifest at `path`, reading it on first use. Read failures are
    /// not cached.
    pub async fn get(&self, path: &Path) -> Result<Arc<BuildManifest>, ManifestError> {
        if let Some(manifest) = self.manifests.read().await.get(path) {
            return Ok(Arc::clone(manifest));
        }

        let mut manifests = self.manifests.write().await;
        if let Some(manifest) = manifests.get(path) {
            return Ok(Arc::clone(manifest));
        }
        tracing::debug!(path = %path.display(), "reading build manifest");
        let manifest = Arc::new(BuildManifest::load(path).await?);
        manifests.insert(path.to_path_buf(), Arc::clone(&manifest));
        Ok(manifest)
    }

    pub async fn len(&self) -> usize {
        self.manifests.read().await.len()
    }
}
