//! # buildport Core
//!
//! Import pipeline for community gear builds.
//!
//! ## Components
//!
//! - [`PageExtractor`] - Reads raw variants from a rendered build page
//! - [`CatalogIndex`] - Match keys over the reference catalog
//! - [`AffixResolver`] - Fuzzy resolution of raw text to catalog ids
//! - [`BuildAssembler`] - Ordering, deduplication and aspect expansion
//! - [`BuildImporter`] - Session, extraction, assembly and storage for one URL
//!
//! Data flows `PageExtractor -> RawVariant -> AffixResolver -> BuildAssembler
//! -> Build -> BuildCatalog`.

pub mod assembler;
pub mod catalog_index;
pub mod error;
pub mod extractor;
pub mod fuzzy;
pub mod importer;
pub mod notify;
pub mod preset;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::{BuildAssembler, dedup_affixes, expand_aspects, sort_affixes};
pub use catalog_index::{CatalogIndex, affix_match_key};
pub use error::{CatalogIndexError, ImportError};
pub use extractor::{ExtractProgress, PageExtractor};
pub use importer::BuildImporter;
pub use notify::TracingSink;
pub use preset::{default_preset_name, load_presets, preset_from_variant, save_presets, upsert_preset};
pub use resolver::{AffixResolver, ResolvedAffix, ResolvedAspect};
