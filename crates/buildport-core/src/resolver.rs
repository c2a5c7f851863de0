//! Fuzzy resolution of scraped text to catalog identifiers.

use std::sync::{Arc, LazyLock};

use buildport_protocols::{ItemAffix, SlotType};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::catalog_index::CatalogIndex;
use crate::fuzzy::{DefaultRatio, WeightedRatio, extract_one};

const DEFAULT_LOW_CONFIDENCE: u8 = 60;

static DEFAULT_ASPECT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)aspect").expect("aspect marker pattern"));

/// An affix line resolved to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAffix {
    pub affix: ItemAffix,
    /// Catalog key that won.
    pub key: String,
    pub score: u8,
}

/// An aspect line resolved to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAspect {
    pub id: String,
    /// Catalog name that won.
    pub name: String,
    pub score: u8,
}

/// Maps raw affix and aspect text to catalog identifiers.
///
/// Every call is independent, so one resolver is shared across blocking
/// tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AffixResolver {
    index: Arc<CatalogIndex>,
    low_confidence: u8,
    aspect_marker: Regex,
}

impl AffixResolver {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self {
            index,
            low_confidence: DEFAULT_LOW_CONFIDENCE,
            aspect_marker: DEFAULT_ASPECT_MARKER.clone(),
        }
    }

    /// Scores below this are logged as low confidence.
    pub fn with_low_confidence(mut self, score: u8) -> Self {
        self.low_confidence = score;
        self
    }

    /// Word stripped from aspect lines before matching.
    pub fn with_aspect_marker(mut self, marker: &str) -> Self {
        match marker_pattern(marker) {
            Ok(pattern) => self.aspect_marker = pattern,
            Err(e) => warn!("Ignoring aspect marker {:?}: {}", marker, e),
        }
        self
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Resolve one affix line for a slot.
    ///
    /// A colon marks a tempered affix; only the text after the first colon
    /// is matched. Returns `None` only when the catalog has no affixes.
    pub fn resolve_affix(&self, raw: &str, slot: SlotType) -> Option<ResolvedAffix> {
        let is_tempered = raw.contains(':');
        let description = tempered_description(raw);

        let best = extract_one(description, self.index.affix_corpus(), &DefaultRatio)?;
        let id = self.index.resolve_affix_key(best.value)?;

        if best.score < self.low_confidence {
            warn!(
                "Low confidence affix match ({}): {:?} -> {:?} [{}]",
                best.score, raw, best.value, slot
            );
        } else {
            debug!("Affix match ({}): {:?} -> {}", best.score, raw, id);
        }

        Some(ResolvedAffix {
            affix: ItemAffix::new(id, slot).tempered(is_tempered),
            key: best.value.to_string(),
            score: best.score,
        })
    }

    /// Resolve one aspect line. Returns `None` only when the catalog has no
    /// aspects.
    pub fn resolve_aspect(&self, raw: &str) -> Option<ResolvedAspect> {
        let query = self.aspect_marker.replace_all(raw, "");

        let best = extract_one(&query, self.index.aspect_corpus(), &WeightedRatio)?;
        let id = self.index.resolve_aspect_key(best.value)?;

        if best.score < self.low_confidence {
            warn!(
                "Low confidence aspect match ({}): {:?} -> {:?}",
                best.score, raw, best.value
            );
        } else {
            debug!("Aspect match ({}): {:?} -> {}", best.score, raw, id);
        }

        Some(ResolvedAspect {
            id: id.to_string(),
            name: best.value.to_string(),
            score: best.score,
        })
    }
}

/// Text matched for an affix line: after the first colon when present,
/// falling back to the whole line if nothing follows it.
pub fn tempered_description(raw: &str) -> &str {
    match raw.split_once(':') {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim(),
        _ => raw.trim(),
    }
}

fn marker_pattern(marker: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(marker))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
