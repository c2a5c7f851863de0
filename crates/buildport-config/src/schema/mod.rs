//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod schema_browser;
mod schema_extract;

pub use schema_browser::*;
pub use schema_extract::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl Config {
    /// Expand `~` in every configured path.
    pub fn expand_paths(&mut self) {
        use crate::loader::ConfigLoader;

        let expand = |p: &PathBuf| PathBuf::from(ConfigLoader::expand_path(&p.to_string_lossy()));

        self.catalog.affixes = expand(&self.catalog.affixes);
        self.catalog.aspects = expand(&self.catalog.aspects);
        self.storage.builds_dir = expand(&self.storage.builds_dir);
        self.storage.presets_file = expand(&self.storage.presets_file);
        if let Some(dir) = &self.browser.user_data_dir {
            self.browser.user_data_dir = Some(expand(dir));
        }
        if let Some(path) = &self.browser.chrome_path {
            self.browser.chrome_path = Some(expand(path));
        }
    }
}

/// Reference catalog locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of affix records.
    #[serde(default = "default_affixes_path")]
    pub affixes: PathBuf,

    /// JSON array of aspect records.
    #[serde(default = "default_aspects_path")]
    pub aspects: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            affixes: default_affixes_path(),
            aspects: default_aspects_path(),
        }
    }
}

fn default_affixes_path() -> PathBuf {
    PathBuf::from("data/Affixes.enUS.json")
}

fn default_aspects_path() -> PathBuf {
    PathBuf::from("data/Aspects.enUS.json")
}

/// Storage for imported builds and presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per build.
    #[serde(default = "default_builds_dir")]
    pub builds_dir: PathBuf,

    /// JSON file holding exported affix presets.
    #[serde(default = "default_presets_file")]
    pub presets_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            builds_dir: default_builds_dir(),
            presets_file: default_presets_file(),
        }
    }
}

/// Base directory for buildport state (`~/.buildport`).
pub fn buildport_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".buildport"))
        .unwrap_or_else(|| PathBuf::from(".buildport"))
}

fn default_builds_dir() -> PathBuf {
    buildport_dir().join("builds")
}

fn default_presets_file() -> PathBuf {
    buildport_dir().join("presets.json")
}

/// Fuzzy resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Upper bound on entries resolved in parallel.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Matches scoring below this are logged as low confidence (still accepted).
    #[serde(default = "default_low_confidence_score")]
    pub low_confidence_score: u8,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            low_confidence_score: default_low_confidence_score(),
        }
    }
}

fn default_max_concurrent() -> usize {
    8
}

fn default_low_confidence_score() -> u8 {
    60
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
