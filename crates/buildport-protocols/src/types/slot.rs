//! Equipment slot categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed equipment categories a preset is organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    Helm,
    Chest,
    Gloves,
    Pants,
    Boots,
    Amulet,
    Ring,
    Weapon,
    Ranged,
    Offhand,
}

impl SlotType {
    /// All slot categories, in preset order.
    pub const ALL: [SlotType; 10] = [
        SlotType::Helm,
        SlotType::Chest,
        SlotType::Gloves,
        SlotType::Pants,
        SlotType::Boots,
        SlotType::Amulet,
        SlotType::Ring,
        SlotType::Weapon,
        SlotType::Ranged,
        SlotType::Offhand,
    ];

    /// Identifier used in persisted presets.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotType::Helm => "helm",
            SlotType::Chest => "chest",
            SlotType::Gloves => "gloves",
            SlotType::Pants => "pants",
            SlotType::Boots => "boots",
            SlotType::Amulet => "amulet",
            SlotType::Ring => "ring",
            SlotType::Weapon => "weapon",
            SlotType::Ranged => "ranged",
            SlotType::Offhand => "offhand",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
