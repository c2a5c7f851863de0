//! Detection of the multi-variant layout.

use buildport_config::SelectorConfig;
use buildport_protocols::{ElementHandle, PageDriver, PageError};
use tracing::debug;

/// Variant tabs of the page, or an empty list for a single-variant page.
///
/// The container is the first candidate with at least two children that
/// all carry a label. A page without the main content element is treated
/// as single-variant.
pub(super) async fn variant_tabs(
    page: &dyn PageDriver,
    selectors: &SelectorConfig,
) -> Result<Vec<ElementHandle>, PageError> {
    let main = match page.find_element(None, &selectors.main_content).await {
        Ok(main) => main,
        Err(e) if e.is_not_found() => {
            debug!("No {} element on page", selectors.main_content);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let candidates = page
        .find_elements(Some(&main), &selectors.variant_candidates)
        .await?;

    for candidate in candidates {
        let children = page
            .find_elements(Some(&candidate), &selectors.variant_children)
            .await?;
        if children.len() <= 1 {
            continue;
        }

        let labelled = page
            .find_elements(Some(&candidate), &selectors.variant_labelled_children)
            .await?;
        if labelled.len() == children.len() {
            return Ok(children);
        }
    }

    Ok(Vec::new())
}
