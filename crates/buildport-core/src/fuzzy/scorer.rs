//! Scorers used to rank catalog keys.

use super::ratio::{
    full_process, partial_ratio, partial_token_set_ratio, partial_token_sort_ratio, ratio,
    token_set_ratio, token_sort_ratio,
};

/// Similarity of a query against one choice, `0..=100`.
pub trait Scorer: Send + Sync {
    fn score(&self, query: &str, choice: &str) -> u8;
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Plain edit-distance ratio on normalized text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRatio;

impl Scorer for DefaultRatio {
    fn score(&self, query: &str, choice: &str) -> u8 {
        to_score(ratio(&full_process(query), &full_process(choice)))
    }
}

/// Weighted combination of plain, partial and token-based ratios.
///
/// Tolerates reordered words and one side being a fragment of the other,
/// which plain [`DefaultRatio`] punishes heavily.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

const UNBASE_SCALE: f64 = 0.95;

impl Scorer for WeightedRatio {
    fn score(&self, query: &str, choice: &str) -> u8 {
        let p1 = full_process(query);
        let p2 = full_process(choice);
        if p1.is_empty() || p2.is_empty() {
            return 0;
        }

        let base = ratio(&p1, &p2);
        let (l1, l2) = (p1.chars().count() as f64, p2.chars().count() as f64);
        let len_ratio = l1.max(l2) / l1.min(l2);

        let best = if len_ratio < 1.5 {
            let tsor = token_sort_ratio(&p1, &p2) * UNBASE_SCALE;
            let tser = token_set_ratio(&p1, &p2) * UNBASE_SCALE;
            base.max(tsor).max(tser)
        } else {
            let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
            let partial = partial_ratio(&p1, &p2) * partial_scale;
            let ptsor = partial_token_sort_ratio(&p1, &p2) * UNBASE_SCALE * partial_scale;
            let ptser = partial_token_set_ratio(&p1, &p2) * UNBASE_SCALE * partial_scale;
            base.max(partial).max(ptsor).max(ptser)
        };

        to_score(best)
    }
}
