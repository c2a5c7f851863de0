//! Reading the aspects and gear stats panels.

use buildport_config::{ExtractConfig, SelectorConfig};
use buildport_protocols::{ElementHandle, PageDriver, PageError};

use super::text;

async fn panel_entries(
    page: &dyn PageDriver,
    selectors: &SelectorConfig,
    header: &str,
) -> Result<Vec<ElementHandle>, PageError> {
    let container = page
        .find_element(None, &selectors.panel_container_for(header))
        .await?;
    let body = page.find_element(Some(&container), &selectors.panel_body).await?;
    page.find_elements(Some(&body), &selectors.panel_entries).await
}

/// First aspect line of every entry in the aspects panel.
pub(super) async fn read_aspects(
    page: &dyn PageDriver,
    config: &ExtractConfig,
) -> Result<Vec<String>, PageError> {
    let entries = panel_entries(page, &config.selectors, &config.aspects_header).await?;

    let mut aspects = Vec::new();
    for entry in entries {
        let content = page.read_text(&entry).await?;
        if let Some(line) = text::first_line_containing(&content, &config.aspect_marker) {
            aspects.push(line.to_string());
        }
    }
    Ok(aspects)
}

/// Affix lines of the gear group labelled `label`. A missing group yields
/// an empty list.
pub(super) async fn read_slot(
    page: &dyn PageDriver,
    config: &ExtractConfig,
    label: &str,
) -> Result<Vec<String>, PageError> {
    let selectors = &config.selectors;
    let groups = panel_entries(page, selectors, &config.gear_stats_header).await?;

    let mut matched = None;
    for group in groups {
        let labels = page.find_elements(Some(&group), &selectors.slot_label).await?;
        if let Some(first) = labels.first() {
            if page.read_text(first).await?.trim() == label {
                matched = Some(group);
                break;
            }
        }
    }

    let Some(group) = matched else {
        return Ok(Vec::new());
    };

    let mut lines = Vec::new();
    for item in page.find_elements(Some(&group), &selectors.slot_items).await? {
        let segments = page.find_elements(Some(&item), &selectors.item_segments).await?;
        let Some(primary) = segments.first() else {
            continue;
        };

        let primary = page.read_text(primary).await?;
        let value = match segments.get(1) {
            Some(segment) => Some(page.read_text(segment).await?),
            None => None,
        };

        let line = text::strip_value(&primary, value.as_deref());
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
