//! Normalized affix presets.

use serde::{Deserialize, Serialize};

use super::slot::SlotType;

/// An affix resolved to a catalog identifier for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemAffix {
    pub id: String,
    #[serde(rename = "Type")]
    pub slot: SlotType,
    #[serde(default)]
    pub is_tempered: bool,
    #[serde(default)]
    pub is_implicit: bool,
}

impl ItemAffix {
    pub fn new(id: impl Into<String>, slot: SlotType) -> Self {
        Self {
            id: id.into(),
            slot,
            is_tempered: false,
            is_implicit: false,
        }
    }

    pub fn tempered(mut self, is_tempered: bool) -> Self {
        self.is_tempered = is_tempered;
        self
    }

    pub fn implicit(mut self, is_implicit: bool) -> Self {
        self.is_implicit = is_implicit;
        self
    }
}

/// An aspect bound to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemAspect {
    pub id: String,
    #[serde(rename = "Type")]
    pub slot: SlotType,
}

impl ItemAspect {
    pub fn new(id: impl Into<String>, slot: SlotType) -> Self {
        Self {
            id: id.into(),
            slot,
        }
    }
}

/// A named, slot-organized set of affixes and aspects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffixPreset {
    pub name: String,
    #[serde(default)]
    pub item_affixes: Vec<ItemAffix>,
    #[serde(default)]
    pub item_aspects: Vec<ItemAspect>,
}

impl AffixPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_affixes: Vec::new(),
            item_aspects: Vec::new(),
        }
    }

    /// Affixes for one slot, in preset order.
    pub fn affixes_for(&self, slot: SlotType) -> impl Iterator<Item = &ItemAffix> {
        self.item_affixes.iter().filter(move |a| a.slot == slot)
    }
}
