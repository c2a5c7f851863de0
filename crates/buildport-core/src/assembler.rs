//! Assembly of a variant's raw text into an affix preset.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use buildport_protocols::{AffixPreset, ItemAffix, ItemAspect, RawVariant, SlotType};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::error::ImportError;
use crate::resolver::AffixResolver;

const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Turns [`RawVariant`]s into [`AffixPreset`]s.
///
/// Entries are resolved on the blocking pool with at most `max_concurrent`
/// in flight. Results are merged in input order, so the output does not
/// depend on which task finishes first.
#[derive(Debug, Clone)]
pub struct BuildAssembler {
    resolver: Arc<AffixResolver>,
    max_concurrent: usize,
}

impl BuildAssembler {
    pub fn new(resolver: Arc<AffixResolver>) -> Self {
        Self {
            resolver,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn resolver(&self) -> &AffixResolver {
        &self.resolver
    }

    /// Resolve, order and deduplicate a variant's affixes and expand its
    /// aspects. The preset is named after the variant.
    pub async fn assemble(&self, raw: &RawVariant) -> Result<AffixPreset, ImportError> {
        let affixes = self.resolve_affixes(raw.entries()).await?;
        let aspect_ids = self.resolve_aspects(raw.aspects.clone()).await?;

        let mut preset = AffixPreset::new(raw.name.clone());
        preset.item_affixes = affixes;
        sort_affixes(&mut preset.item_affixes);
        dedup_affixes(&mut preset.item_affixes);
        preset.item_aspects = expand_aspects(aspect_ids);

        debug!(
            "Assembled '{}': {} affixes, {} aspect entries",
            preset.name,
            preset.item_affixes.len(),
            preset.item_aspects.len()
        );
        Ok(preset)
    }

    async fn resolve_affixes(
        &self,
        entries: Vec<(SlotType, String)>,
    ) -> Result<Vec<ItemAffix>, ImportError> {
        let tasks = entries.into_iter().map(|(slot, line)| {
            let resolver = Arc::clone(&self.resolver);
            tokio::task::spawn_blocking(move || {
                let resolved = resolver.resolve_affix(&line, slot);
                if resolved.is_none() {
                    warn!("Skipping unresolvable affix {:?} [{}]", line, slot);
                }
                resolved.map(|r| r.affix)
            })
        });

        let resolved: Vec<Option<ItemAffix>> = stream::iter(tasks)
            .buffered(self.max_concurrent)
            .map_err(|e| ImportError::Resolve(e.to_string()))
            .try_collect()
            .await?;

        Ok(resolved.into_iter().flatten().collect())
    }

    async fn resolve_aspects(&self, lines: Vec<String>) -> Result<Vec<String>, ImportError> {
        let tasks = lines.into_iter().map(|line| {
            let resolver = Arc::clone(&self.resolver);
            tokio::task::spawn_blocking(move || {
                let resolved = resolver.resolve_aspect(&line);
                if resolved.is_none() {
                    warn!("Skipping unresolvable aspect {:?}", line);
                }
                resolved.map(|r| r.id)
            })
        });

        let resolved: Vec<Option<String>> = stream::iter(tasks)
            .buffered(self.max_concurrent)
            .map_err(|e| ImportError::Resolve(e.to_string()))
            .try_collect()
            .await?;

        Ok(resolved.into_iter().flatten().collect())
    }
}

fn affix_order(a: &ItemAffix, b: &ItemAffix) -> Ordering {
    if a.id == b.id && a.is_implicit == b.is_implicit && a.is_tempered == b.is_tempered {
        return Ordering::Equal;
    }

    // Tempered last, implicit first.
    a.is_tempered
        .cmp(&b.is_tempered)
        .then_with(|| b.is_implicit.cmp(&a.is_implicit))
}

/// Stable sort: tempered affixes after the rest, implicit affixes first
/// within each group. Relative order is otherwise preserved.
pub fn sort_affixes(affixes: &mut [ItemAffix]) {
    affixes.sort_by(affix_order);
}

/// Keep the first affix for each `(id, slot)` pair.
pub fn dedup_affixes(affixes: &mut Vec<ItemAffix>) {
    let mut seen: HashSet<(String, SlotType)> = HashSet::new();
    affixes.retain(|a| seen.insert((a.id.clone(), a.slot)));
}

/// One aspect entry per slot for every distinct id, in first-seen order.
pub fn expand_aspects<I>(ids: I) -> Vec<ItemAspect>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .flat_map(|id| {
            SlotType::ALL
                .into_iter()
                .map(move |slot| ItemAspect::new(id.clone(), slot))
        })
        .collect()
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
