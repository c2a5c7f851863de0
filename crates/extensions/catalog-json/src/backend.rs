//! JSON-file build catalog.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use buildport_protocols::{Build, BuildCatalog, CatalogError};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::JsonCatalogError;

/// Stores each build as `<id>.json` under one directory.
pub struct JsonBuildCatalog {
    storage_path: PathBuf,
    /// In-memory copy of every stored build, keyed by id.
    cache: Arc<RwLock<HashMap<String, Build>>>,
}

impl JsonBuildCatalog {
    /// Open the catalog at `storage_path`, creating the directory if needed.
    pub async fn new(storage_path: impl AsRef<Path>) -> Result<Self, JsonCatalogError> {
        let storage_path = storage_path.as_ref().to_path_buf();

        if !storage_path.exists() {
            fs::create_dir_all(&storage_path).await.map_err(|e| {
                JsonCatalogError::CreateDirFailed {
                    path: storage_path.clone(),
                    reason: e.to_string(),
                }
            })?;
            info!("Created build catalog directory: {:?}", storage_path);
        }

        let catalog = Self {
            storage_path,
            cache: Arc::new(RwLock::new(HashMap::new())),
        };
        catalog.load_all_to_cache().await?;
        Ok(catalog)
    }

    /// Read every `*.json` file in the directory. Unreadable files are skipped.
    async fn load_all_to_cache(&self) -> Result<(), JsonCatalogError> {
        let storage_path = self.storage_path.clone();

        let builds: Vec<Build> = tokio::task::spawn_blocking(move || {
            let mut results = Vec::new();

            for entry in WalkDir::new(&storage_path)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }

                let parsed = std::fs::read_to_string(path)
                    .map_err(|e| e.to_string())
                    .and_then(|content| {
                        serde_json::from_str::<Build>(&content).map_err(|e| e.to_string())
                    });
                match parsed {
                    Ok(build) => results.push(build),
                    Err(e) => warn!("Skipping unreadable build file {:?}: {}", path, e),
                }
            }

            results
        })
        .await
        .map_err(|e| JsonCatalogError::LoadTask(e.to_string()))?;

        let mut cache = self.cache.write().await;
        cache.clear();
        for build in builds {
            cache.insert(build.id.clone(), build);
        }

        info!("Loaded {} builds from {:?}", cache.len(), self.storage_path);
        Ok(())
    }

    /// File name for a build id; anything outside `[A-Za-z0-9_=-]` becomes `_`.
    pub fn id_to_filename(id: &str) -> String {
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}.json", safe_id)
    }

    fn build_path(&self, id: &str) -> PathBuf {
        self.storage_path.join(Self::id_to_filename(id))
    }

    async fn save_to_disk(&self, id: &str, build: &Build) -> Result<(), JsonCatalogError> {
        let path = self.build_path(id);
        let content =
            serde_json::to_string_pretty(build).map_err(|e| JsonCatalogError::Serialize {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        fs::write(&path, content).await?;
        debug!("Saved build to {:?}", path);
        Ok(())
    }

    async fn delete_from_disk(&self, id: &str) -> Result<(), JsonCatalogError> {
        let path = self.build_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
            debug!("Deleted build file {:?}", path);
        }
        Ok(())
    }
}

#[async_trait]
impl BuildCatalog for JsonBuildCatalog {
    async fn put(&self, id: &str, build: Build) -> Result<(), CatalogError> {
        self.save_to_disk(id, &build).await?;
        self.cache.write().await.insert(id.to_string(), build);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Build>, CatalogError> {
        Ok(self.cache.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Build>, CatalogError> {
        let mut builds: Vec<Build> = self.cache.read().await.values().cloned().collect();
        builds.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(builds)
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.delete_from_disk(id).await?;
        self.cache.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
