//! Imported builds and their variants.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use serde::{Deserialize, Serialize};

use super::preset::AffixPreset;
use super::slot::SlotType;

/// One named gear configuration within a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Variant {
    pub name: String,
    pub affix_preset: AffixPreset,
}

/// An imported community build.
///
/// `id` is derived from `url` with [`Build::id_for_url`], so importing the
/// same page again replaces the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Build {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Build {
    /// Create an empty build for a source URL.
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: Self::id_for_url(&url),
            url,
            ..Default::default()
        }
    }

    /// Stable identifier for a source URL (URL-safe base64 of its bytes).
    pub fn id_for_url(url: &str) -> String {
        URL_SAFE.encode(url.as_bytes())
    }

    /// Recover the source URL from an identifier.
    pub fn url_for_id(id: &str) -> Option<String> {
        let bytes = URL_SAFE.decode(id).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Raw text scraped for one variant, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVariant {
    pub name: String,
    pub slots: BTreeMap<SlotType, Vec<String>>,
    pub aspects: Vec<String>,
}

impl RawVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: BTreeMap::new(),
            aspects: Vec::new(),
        }
    }

    /// Raw affix lines for a slot.
    pub fn slot(&self, slot: SlotType) -> &[String] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append lines to a slot, skipping exact duplicates already present.
    ///
    /// Every slot is deduplicated, not only the ones several labels merge
    /// into (`Ring`, `Weapon`). First occurrence order is kept.
    pub fn extend_slot<I>(&mut self, slot: SlotType, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let entries = self.slots.entry(slot).or_default();
        for line in lines {
            if !entries.contains(&line) {
                entries.push(line);
            }
        }
    }

    /// All `(slot, line)` pairs in slot order.
    pub fn entries(&self) -> Vec<(SlotType, String)> {
        SlotType::ALL
            .iter()
            .flat_map(|slot| self.slot(*slot).iter().map(move |line| (*slot, line.clone())))
            .collect()
    }
}
