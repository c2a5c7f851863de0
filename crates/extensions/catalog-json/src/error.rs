//! JSON catalog errors.

use std::path::PathBuf;

use buildport_protocols::CatalogError;
use thiserror::Error;

/// Errors that can occur while opening or writing the catalog directory.
#[derive(Debug, Error)]
pub enum JsonCatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create catalog directory at {path}: {reason}")]
    CreateDirFailed { path: PathBuf, reason: String },

    #[error("Failed to serialize build {id}: {reason}")]
    Serialize { id: String, reason: String },

    #[error("Catalog load task failed: {0}")]
    LoadTask(String),
}

impl From<JsonCatalogError> for CatalogError {
    fn from(err: JsonCatalogError) -> Self {
        match err {
            JsonCatalogError::Serialize { .. } => CatalogError::Serialization(err.to_string()),
            _ => CatalogError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dir_error_display() {
        let err = JsonCatalogError::CreateDirFailed {
            path: PathBuf::from("/readonly/builds"),
            reason: "permission denied".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("/readonly/builds"));
        assert!(display.contains("permission denied"));
    }

    #[test]
    fn test_conversion_to_catalog_error() {
        let err = JsonCatalogError::Serialize {
            id: "aHR0cA==".to_string(),
            reason: "bad".to_string(),
        };
        assert!(matches!(CatalogError::from(err), CatalogError::Serialization(_)));

        let io = JsonCatalogError::Io(std::io::Error::other("disk full"));
        assert!(matches!(CatalogError::from(io), CatalogError::Storage(_)));
    }
}
