//! Approximate string matching.
//!
//! Scores are integers in `0..=100`. Both scorers normalize their inputs
//! first (lowercase, punctuation to spaces, trimmed), so formatting
//! differences between the page and the catalog do not count against a match.

mod ratio;
mod scorer;

pub use ratio::{full_process, partial_ratio, ratio, token_set_ratio, token_sort_ratio};
pub use scorer::{DefaultRatio, Scorer, WeightedRatio};

/// Best-scoring choice for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub value: &'a str,
    pub index: usize,
    pub score: u8,
}

/// Pick the highest-scoring choice. Ties keep the earliest choice.
///
/// Returns `None` only when `choices` is empty; there is no score floor.
pub fn extract_one<'a, S>(query: &str, choices: &'a [String], scorer: &S) -> Option<Match<'a>>
where
    S: Scorer + ?Sized,
{
    let mut best: Option<Match<'a>> = None;

    for (index, choice) in choices.iter().enumerate() {
        let score = scorer.score(query, choice);
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(Match {
                value: choice.as_str(),
                index,
                score,
            });
            if score == 100 {
                break;
            }
        }
    }

    best
}

#[cfg(test)]
#[path = "fuzzy_tests.rs"]
mod tests;
