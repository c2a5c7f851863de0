//! # buildport Catalog: JSON
//!
//! [`BuildCatalog`] that keeps one pretty-printed JSON file per build in a
//! directory, with an in-memory cache loaded at startup.
//!
//! [`BuildCatalog`]: buildport_protocols::BuildCatalog

mod backend;
mod error;

pub use backend::JsonBuildCatalog;
pub use error::JsonCatalogError;
