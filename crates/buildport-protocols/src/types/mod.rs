//! Data model for imported builds.

mod build;
mod catalog_entry;
mod preset;
mod slot;

pub use build::{Build, RawVariant, Variant};
pub use catalog_entry::{AffixCatalogEntry, AspectCatalogEntry};
pub use preset::{AffixPreset, ItemAffix, ItemAspect};
pub use slot::SlotType;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
