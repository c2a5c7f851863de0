//! Raw build extraction from a rendered build-planner page.
//!
//! The page layout is not stable, so extraction is heuristic: every selector
//! and header text comes from [`ExtractConfig`], and a panel or slot that
//! cannot be read contributes an empty list instead of failing the import.
//! Only a lost session is fatal.

mod layout;
mod panels;
pub mod text;

use std::time::Duration;

use buildport_config::ExtractConfig;
use buildport_protocols::{ElementHandle, PageDriver, PageError, RawVariant, Selector};
use chrono::Local;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ImportError;

/// Timestamp format used when the page has no last-update line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Progress of [`PageExtractor::extract_variants_with`].
#[derive(Debug, Clone, Copy)]
pub enum ExtractProgress<'a> {
    Started(&'a str),
    Finished(&'a RawVariant),
}

/// Restores the implicit wait it replaced when dropped.
struct ImplicitWaitGuard<'a> {
    page: &'a dyn PageDriver,
    saved: Duration,
}

impl<'a> ImplicitWaitGuard<'a> {
    fn set(page: &'a dyn PageDriver, wait: Duration) -> Self {
        let saved = page.implicit_wait();
        page.set_implicit_wait(wait);
        Self { page, saved }
    }
}

impl Drop for ImplicitWaitGuard<'_> {
    fn drop(&mut self) {
        self.page.set_implicit_wait(self.saved);
    }
}

/// Reads build title, date and raw variants from one page session.
pub struct PageExtractor<'a> {
    page: &'a dyn PageDriver,
    config: &'a ExtractConfig,
}

impl<'a> PageExtractor<'a> {
    pub fn new(page: &'a dyn PageDriver, config: &'a ExtractConfig) -> Self {
        Self { page, config }
    }

    /// Accept the cookie consent dialog if it shows up within the consent
    /// timeout. Returns whether it was dismissed.
    pub async fn dismiss_consent(&self) -> Result<bool, ImportError> {
        let selectors = &self.config.selectors;
        let dialog = self
            .page
            .wait_until_displayed(
                &selectors.consent_dialog,
                self.config.consent_timeout(),
                self.config.poll_interval(),
            )
            .await;

        let Some(dialog) = self.absorb(dialog, "consent dialog")?.flatten() else {
            debug!("No consent dialog");
            return Ok(false);
        };

        let buttons = self
            .page
            .find_elements(Some(&dialog), &selectors.consent_buttons)
            .await;
        let Some(accept) = self.absorb(buttons, "consent buttons")?.and_then(|b| b.get(1).copied())
        else {
            warn!("Consent dialog has no accept button");
            return Ok(false);
        };

        let clicked = self.page.click(&accept).await;
        if self.absorb(clicked, "consent accept")?.is_none() {
            return Ok(false);
        }
        tokio::time::sleep(self.config.click_delay()).await;
        info!("Dismissed consent dialog");
        Ok(true)
    }

    /// Build title: the second line of the page heading.
    pub async fn build_name(&self) -> Result<Option<String>, ImportError> {
        let selectors = &self.config.selectors;
        let heading = self.container_text(&selectors.title).await;
        Ok(self
            .absorb(heading, "build title")?
            .and_then(|text| text::second_line(&text).map(str::to_string)))
    }

    /// Last-update line of the page footer, or the current local time.
    pub async fn last_update(&self) -> Result<String, ImportError> {
        let selectors = &self.config.selectors;
        let footer = self.container_text(&selectors.footer).await;
        let date = self
            .absorb(footer, "last update")?
            .and_then(|text| text::second_line(&text).map(str::to_string));

        Ok(match date {
            Some(date) => date,
            None => {
                warn!("No last-update line on page, using current time");
                Local::now().format(DATE_FORMAT).to_string()
            }
        })
    }

    /// Extract every variant of the build.
    ///
    /// A page without a variant selector yields one variant named
    /// `fallback_name`.
    pub async fn extract_variants(
        &self,
        fallback_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawVariant>, ImportError> {
        self.extract_variants_with(fallback_name, cancel, |_| {}).await
    }

    /// [`extract_variants`](Self::extract_variants) with a progress callback.
    pub async fn extract_variants_with<F>(
        &self,
        fallback_name: &str,
        cancel: &CancellationToken,
        mut progress: F,
    ) -> Result<Vec<RawVariant>, ImportError>
    where
        F: FnMut(ExtractProgress<'_>),
    {
        let tabs = {
            // Most layout candidates are absent; do not wait for them.
            let _wait = ImplicitWaitGuard::set(self.page, Duration::ZERO);
            layout::variant_tabs(self.page, &self.config.selectors).await
        };
        let tabs = self.absorb(tabs, "variant layout")?.unwrap_or_default();

        if tabs.is_empty() {
            debug!("Single-variant layout");
            let variant = self.extract_variant(fallback_name, cancel, &mut progress).await?;
            return Ok(vec![variant]);
        }

        info!("Found {} variants", tabs.len());
        let panel_header = self
            .config
            .selectors
            .panel_header_for(&self.config.aspects_header);

        let mut variants = Vec::with_capacity(tabs.len());
        for tab in tabs {
            if cancel.is_cancelled() {
                return Err(ImportError::Cancelled);
            }

            self.page.click(&tab).await?;
            self.settle(Some(&panel_header)).await;

            let name = self.page.read_text(&tab).await?.trim().to_string();
            variants.push(self.extract_variant(&name, cancel, &mut progress).await?);
        }

        Ok(variants)
    }

    async fn extract_variant<F>(
        &self,
        name: &str,
        cancel: &CancellationToken,
        progress: &mut F,
    ) -> Result<RawVariant, ImportError>
    where
        F: FnMut(ExtractProgress<'_>),
    {
        progress(ExtractProgress::Started(name));

        // Absent slots are common; do not wait for them.
        let guard = ImplicitWaitGuard::set(self.page, Duration::ZERO);

        let mut raw = RawVariant::new(name);
        let selectors = &self.config.selectors;
        let tabs = self.panel_tabs().await?;

        if let Some(tab) = tabs.first() {
            self.click_tab(tab, &selectors.panel_container_for(&self.config.aspects_header))
                .await?;
        }
        let aspects = panels::read_aspects(self.page, self.config).await;
        raw.aspects = self.absorb(aspects, "aspects")?.unwrap_or_default();

        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }

        if let Some(tab) = tabs.get(1) {
            self.click_tab(tab, &selectors.panel_container_for(&self.config.gear_stats_header))
                .await?;
        }

        for label in &self.config.slot_labels {
            if cancel.is_cancelled() {
                return Err(ImportError::Cancelled);
            }

            let lines = panels::read_slot(self.page, self.config, &label.label).await;
            let lines = self.absorb(lines, &label.label)?.unwrap_or_default();
            debug!("{}: {} affixes", label.label, lines.len());
            raw.extend_slot(label.slot, lines);
        }

        drop(guard);
        progress(ExtractProgress::Finished(&raw));
        Ok(raw)
    }

    async fn panel_tabs(&self) -> Result<Vec<ElementHandle>, ImportError> {
        let selectors = &self.config.selectors;
        let header = selectors.panel_header_for(&self.config.aspects_header);

        let tabs = match self.page.find_element(None, &header).await {
            Ok(header) => self.page.find_elements(Some(&header), &selectors.panel_tabs).await,
            Err(e) => Err(e),
        };
        let tabs = self.absorb(tabs, "panel tabs")?.unwrap_or_default();

        if tabs.len() < 2 {
            warn!(
                "Expected 2 panel tabs under '{}', found {}",
                self.config.aspects_header,
                tabs.len()
            );
        }
        Ok(tabs)
    }

    async fn click_tab(&self, tab: &ElementHandle, expected: &Selector) -> Result<(), ImportError> {
        let clicked = self.page.click(tab).await;
        if self.absorb(clicked, "panel tab")?.is_some() {
            self.settle(Some(expected)).await;
        }
        Ok(())
    }

    async fn container_text(&self, selector: &Selector) -> Result<String, PageError> {
        let selectors = &self.config.selectors;
        let container = self.page.find_element(None, &selectors.title_container).await?;
        let element = self.page.find_element(Some(&container), selector).await?;
        self.page.read_text(&element).await
    }

    /// Wait for the page to re-render after a click.
    async fn settle(&self, expected: Option<&Selector>) {
        let delay = self.config.click_delay();

        if let (true, Some(expected)) = (self.config.poll_for_render, expected) {
            match self
                .page
                .wait_until_displayed(expected, delay, self.config.poll_interval())
                .await
            {
                Ok(_) => return,
                Err(e) => debug!("Render poll for {} failed: {}", expected, e),
            }
        }

        tokio::time::sleep(delay).await;
    }

    /// Turn a page failure into `None` with a warning, unless the session
    /// is gone.
    fn absorb<T>(&self, result: Result<T, PageError>, what: &str) -> Result<Option<T>, ImportError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_session_lost() => Err(ImportError::Session(e)),
            Err(e) => {
                warn!("Could not read {}: {}", what, e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
