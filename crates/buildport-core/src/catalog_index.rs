//! Lookup tables over the reference catalog.
//!
//! Affixes are matched on a key derived from their clean description,
//! aspects on their display name. Both map back to the catalog `IdName`.

use std::collections::HashMap;
use std::path::Path;

use buildport_protocols::{AffixCatalogEntry, AspectCatalogEntry};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::CatalogIndexError;

/// Match keys and their identifiers, built once per pipeline run.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    affix_keys: Vec<String>,
    affix_ids: HashMap<String, String>,
    aspect_names: Vec<String>,
    aspect_ids: HashMap<String, String>,
}

impl CatalogIndex {
    /// Build the index. For duplicate keys the first entry wins.
    pub fn from_entries(affixes: &[AffixCatalogEntry], aspects: &[AspectCatalogEntry]) -> Self {
        let mut index = Self::default();

        let mut collisions = 0usize;
        for entry in affixes {
            let key = affix_match_key(&entry.description_clean).to_string();
            if index.affix_ids.contains_key(&key) {
                collisions += 1;
                continue;
            }
            index.affix_ids.insert(key.clone(), entry.id_name.clone());
            index.affix_keys.push(key);
        }
        if collisions > 0 {
            warn!("{} affix catalog entries share a match key; kept the first of each", collisions);
        }

        let mut collisions = 0usize;
        for entry in aspects {
            if index.aspect_ids.contains_key(&entry.name) {
                collisions += 1;
                continue;
            }
            index.aspect_ids.insert(entry.name.clone(), entry.id_name.clone());
            index.aspect_names.push(entry.name.clone());
        }
        if collisions > 0 {
            warn!("{} aspect catalog entries share a name; kept the first of each", collisions);
        }

        index
    }

    /// Read both catalog files (JSON arrays) and build the index.
    pub fn load(affix_path: &Path, aspect_path: &Path) -> Result<Self, CatalogIndexError> {
        let affixes: Vec<AffixCatalogEntry> = read_json_array(affix_path)?;
        let aspects: Vec<AspectCatalogEntry> = read_json_array(aspect_path)?;

        let index = Self::from_entries(&affixes, &aspects);
        info!(
            "Loaded catalog: {} affix keys, {} aspect names",
            index.affix_keys.len(),
            index.aspect_names.len()
        );
        Ok(index)
    }

    /// Distinct affix match keys in catalog order.
    pub fn affix_corpus(&self) -> &[String] {
        &self.affix_keys
    }

    /// Distinct aspect names in catalog order.
    pub fn aspect_corpus(&self) -> &[String] {
        &self.aspect_names
    }

    pub fn resolve_affix_key(&self, key: &str) -> Option<&str> {
        self.affix_ids.get(key).map(String::as_str)
    }

    pub fn resolve_aspect_key(&self, name: &str) -> Option<&str> {
        self.aspect_ids.get(name).map(String::as_str)
    }
}

/// Match key of an affix description.
///
/// Descriptions with a closing parenthesis are cut at every parenthesis and
/// the first non-empty piece is used, so `"Strength (+[8 - 12])"` becomes
/// `"Strength "`. Without a `)` the description is the key as is.
pub fn affix_match_key(description: &str) -> &str {
    if !description.contains(')') {
        return description;
    }
    description
        .split(['(', ')'])
        .find(|part| !part.is_empty())
        .unwrap_or(description)
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogIndexError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogIndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogIndexError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "catalog_index_tests.rs"]
mod tests;
