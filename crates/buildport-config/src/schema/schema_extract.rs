//! Page extraction configuration types.
//!
//! The build-planner layout changes without notice, so every structural
//! assumption the extractor makes lives here rather than in code.

use std::time::Duration;

use buildport_protocols::{Selector, SlotType};
use serde::{Deserialize, Serialize};

/// Extraction timing, texts and selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Delay after a click so the page can re-render.
    #[serde(default = "default_click_delay_ms")]
    pub click_delay_ms: u64,

    /// Implicit wait for lookups outside slot probing.
    #[serde(default = "default_implicit_wait_ms")]
    pub implicit_wait_ms: u64,

    /// How long to look for the consent dialog.
    #[serde(default = "default_consent_timeout_ms")]
    pub consent_timeout_ms: u64,

    /// Interval between condition polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Poll for the expected panel after a click instead of sleeping the
    /// full delay. The delay still bounds the poll.
    #[serde(default)]
    pub poll_for_render: bool,

    /// Header text of the aspects panel.
    #[serde(default = "default_aspects_header")]
    pub aspects_header: String,

    /// Header text of the gear stats panel.
    #[serde(default = "default_gear_stats_header")]
    pub gear_stats_header: String,

    /// Substring identifying aspect lines (case-insensitive).
    #[serde(default = "default_aspect_marker")]
    pub aspect_marker: String,

    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Page label to slot mapping, in extraction order.
    #[serde(default = "default_slot_labels")]
    pub slot_labels: Vec<SlotLabel>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            click_delay_ms: default_click_delay_ms(),
            implicit_wait_ms: default_implicit_wait_ms(),
            consent_timeout_ms: default_consent_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_for_render: false,
            aspects_header: default_aspects_header(),
            gear_stats_header: default_gear_stats_header(),
            aspect_marker: default_aspect_marker(),
            selectors: SelectorConfig::default(),
            slot_labels: default_slot_labels(),
        }
    }
}

impl ExtractConfig {
    pub fn click_delay(&self) -> Duration {
        Duration::from_millis(self.click_delay_ms)
    }

    pub fn implicit_wait(&self) -> Duration {
        Duration::from_millis(self.implicit_wait_ms)
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_millis(self.consent_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Configuration with all waits set to zero, for scripted pages.
    pub fn without_delays() -> Self {
        Self {
            click_delay_ms: 0,
            implicit_wait_ms: 0,
            consent_timeout_ms: 0,
            poll_interval_ms: 0,
            ..Self::default()
        }
    }
}

fn default_click_delay_ms() -> u64 {
    500
}

fn default_implicit_wait_ms() -> u64 {
    10_000
}

fn default_consent_timeout_ms() -> u64 {
    10_000
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_aspects_header() -> String {
    "Aspects & Uniques".to_string()
}

fn default_gear_stats_header() -> String {
    "Gear Stats".to_string()
}

fn default_aspect_marker() -> String {
    "Aspect".to_string()
}

/// A gear slot label as printed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLabel {
    pub label: String,
    pub slot: SlotType,
}

impl SlotLabel {
    pub fn new(label: impl Into<String>, slot: SlotType) -> Self {
        Self {
            label: label.into(),
            slot,
        }
    }
}

fn default_slot_labels() -> Vec<SlotLabel> {
    vec![
        SlotLabel::new("Helm", SlotType::Helm),
        SlotLabel::new("Chest Armor", SlotType::Chest),
        SlotLabel::new("Gloves", SlotType::Gloves),
        SlotLabel::new("Pants", SlotType::Pants),
        SlotLabel::new("Boots", SlotType::Boots),
        SlotLabel::new("Amulet", SlotType::Amulet),
        SlotLabel::new("Ring 1", SlotType::Ring),
        SlotLabel::new("Ring 2", SlotType::Ring),
        SlotLabel::new("Weapon", SlotType::Weapon),
        SlotLabel::new("Bludgeoning Weapon", SlotType::Weapon),
        SlotLabel::new("Slashing Weapon", SlotType::Weapon),
        SlotLabel::new("Dual-Wield Weapon 1", SlotType::Weapon),
        SlotLabel::new("Dual-Wield Weapon 2", SlotType::Weapon),
        SlotLabel::new("Ranged Weapon", SlotType::Ranged),
        SlotLabel::new("Offhand", SlotType::Offhand),
    ]
}

/// Element selectors used by the extractor.
///
/// `panel_header` and `panel_container` take a `{header}` placeholder that is
/// filled with the panel's header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub main_content: Selector,
    /// Candidate variant containers, relative to `main_content`.
    pub variant_candidates: Selector,
    pub variant_children: Selector,
    /// Children that carry a label; equal counts mark the variant container.
    pub variant_labelled_children: Selector,
    pub panel_header: Selector,
    /// Tabs inside the panel header: aspects first, gear stats second.
    pub panel_tabs: Selector,
    pub panel_container: Selector,
    pub panel_body: Selector,
    pub panel_entries: Selector,
    /// Label of a gear group, relative to the group.
    pub slot_label: Selector,
    pub slot_items: Selector,
    /// Text segments of an item: primary text, then an optional value.
    pub item_segments: Selector,
    pub title_container: Selector,
    pub title: Selector,
    pub footer: Selector,
    pub consent_dialog: Selector,
    /// Buttons inside the consent dialog; the second one accepts.
    pub consent_buttons: Selector,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            main_content: Selector::tag("main"),
            variant_candidates: Selector::xpath("./div/div/div[1]/div"),
            variant_children: Selector::xpath("./div"),
            variant_labelled_children: Selector::xpath("./div[./span]"),
            panel_header: Selector::xpath("//header[./div[contains(text(), '{header}')]]"),
            panel_tabs: Selector::tag("div"),
            panel_container: Selector::xpath(
                "//div[./header[./div[contains(text(), '{header}')]]]",
            ),
            panel_body: Selector::xpath(".//div/div[1]"),
            panel_entries: Selector::xpath("div"),
            slot_label: Selector::xpath(".//div/div/div/span[1]"),
            slot_items: Selector::tag("li"),
            item_segments: Selector::tag("span"),
            title_container: Selector::id("container"),
            title: Selector::tag("h1"),
            footer: Selector::tag("footer"),
            consent_dialog: Selector::class("qc-cmp2-summary-buttons"),
            consent_buttons: Selector::tag("button"),
        }
    }
}

impl SelectorConfig {
    /// Header element of the panel titled `header`.
    pub fn panel_header_for(&self, header: &str) -> Selector {
        self.panel_header.with_placeholder("header", header)
    }

    /// Container element of the panel titled `header`.
    pub fn panel_container_for(&self, header: &str) -> Selector {
        self.panel_container.with_placeholder("header", header)
    }
}
