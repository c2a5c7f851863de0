//! Reference catalog records.
//!
//! The catalog files are arrays of objects with PascalCase keys. Only the
//! fields needed for matching are read; everything else is ignored.

use serde::{Deserialize, Serialize};

/// Canonical affix record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixCatalogEntry {
    #[serde(rename = "IdName")]
    pub id_name: String,
    #[serde(rename = "DescriptionClean", default)]
    pub description_clean: String,
}

impl AffixCatalogEntry {
    pub fn new(id_name: impl Into<String>, description_clean: impl Into<String>) -> Self {
        Self {
            id_name: id_name.into(),
            description_clean: description_clean.into(),
        }
    }
}

/// Canonical aspect record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectCatalogEntry {
    #[serde(rename = "IdName")]
    pub id_name: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl AspectCatalogEntry {
    pub fn new(id_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id_name: id_name.into(),
            name: name.into(),
        }
    }
}
