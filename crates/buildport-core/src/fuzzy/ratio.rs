//! Similarity ratios on normalized strings.
//!
//! All functions here expect already-processed input (see [`full_process`])
//! and return a score in `0.0..=100.0`. An empty side scores 0.

use std::collections::BTreeSet;

/// Lowercase, map non-alphanumerics to spaces, collapse and trim whitespace.
pub fn full_process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit-distance similarity of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best [`ratio`] of the shorter string against every same-length window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.len() == long.len() {
        return ratio(a, b);
    }

    let short: String = short.into_iter().collect();
    let mut best = 0.0_f64;
    for window in long.windows(short.chars().count()) {
        let candidate: String = window.iter().collect();
        let score = ratio(&short, &candidate);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// [`ratio`] after sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// [`partial_ratio`] after sorting the words of both strings.
pub fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set(a: &str, b: &str, score: fn(&str, &str) -> f64) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection: Vec<&str> = ta.intersection(&tb).copied().collect();
    let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
    let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

    let sect = intersection.join(" ");
    let combined_a = format!("{} {}", sect, only_a.join(" ")).trim().to_string();
    let combined_b = format!("{} {}", sect, only_b.join(" ")).trim().to_string();

    [
        score(&sect, &combined_a),
        score(&sect, &combined_b),
        score(&combined_a, &combined_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Compares the shared words against each side's leftovers, so extra words
/// on one side cost little.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set(a, b, ratio)
}

/// [`token_set_ratio`] using [`partial_ratio`] for the comparisons.
pub fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    token_set(a, b, partial_ratio)
}
