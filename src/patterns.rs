use crate::config::KasiskiParams;
use crate::stats::normalize_letters;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A substring seen more than once, with strictly increasing start offsets
/// into the normalised text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub substring: String,
    pub positions: Vec<usize>,
    pub length: usize,
}

impl PatternMatch {
    pub fn occurrences(&self) -> usize {
        self.positions.len()
    }

    /// Every pairwise distance between occurrences.
    pub fn spacings(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().enumerate().flat_map(move |(i, &a)| {
            self.positions[i + 1..].iter().map(move |&b| b - a)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KasiskiResult {
    /// Divisors of the accepted spacings, deduplicated and ascending.
    pub key_lengths: Vec<usize>,
    /// Accepted spacing -> number of times it was observed.
    pub spacing_frequencies: BTreeMap<usize, usize>,
    /// Candidate key length -> accumulated recurrence across all spacings.
    pub factor_frequencies: BTreeMap<usize, usize>,
}

impl KasiskiResult {
    pub fn is_empty(&self) -> bool {
        self.key_lengths.is_empty()
    }

    /// Key lengths by recurrence, strongest first; ties go to the shorter length.
    pub fn ranked_key_lengths(&self) -> Vec<usize> {
        let mut ranked: Vec<(usize, usize)> = self
            .factor_frequencies
            .iter()
            .map(|(&len, &freq)| (len, freq))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().map(|(len, _)| len).collect()
    }
}

/// Divisors of `n` that are at least 2, `n` itself included.
pub fn divisors(n: usize) -> Vec<usize> {
    let mut out = BTreeSet::new();
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            out.insert(i);
            out.insert(n / i);
        }
        i += 1;
    }
    if n >= 2 {
        out.insert(n);
    }
    out.into_iter().collect()
}

pub struct PatternFinder {
    text: String,
}

impl PatternFinder {
    /// Keeps only letters, case-folded.
    pub fn new(text: &str) -> Self {
        Self {
            text: normalize_letters(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn windows(&self, length: usize) -> impl Iterator<Item = (usize, &str)> {
        let count = if length == 0 || self.text.len() < length {
            0
        } else {
            self.text.len() - length + 1
        };
        (0..count).map(move |i| (i, &self.text[i..i + length]))
    }

    /// Substrings of every length in `min_len..=max_len` occurring at least
    /// twice, most frequent first. Ties keep length then lexical order.
    pub fn find_repeating_patterns(&self, min_len: usize, max_len: usize) -> Vec<PatternMatch> {
        let mut patterns = Vec::new();
        for length in min_len.max(1)..=max_len {
            let mut seen: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
            for (i, w) in self.windows(length) {
                seen.entry(w).or_default().push(i);
            }
            patterns.extend(seen.into_iter().filter(|(_, p)| p.len() > 1).map(
                |(s, positions)| PatternMatch {
                    substring: s.to_string(),
                    positions,
                    length,
                },
            ));
        }
        // Stable, so equal counts stay in (length, substring) order.
        patterns.sort_by(|a, b| b.occurrences().cmp(&a.occurrences()));
        patterns
    }

    pub fn kasiski_examination(&self, params: &KasiskiParams) -> KasiskiResult {
        let patterns =
            self.find_repeating_patterns(params.kasiski_min_length, params.kasiski_max_length);
        let accepted = params.kasiski_min_spacing..=params.kasiski_max_spacing;

        let mut spacing_frequencies = BTreeMap::new();
        for pattern in &patterns {
            for spacing in pattern.spacings().filter(|s| accepted.contains(s)) {
                *spacing_frequencies.entry(spacing).or_insert(0) += 1;
            }
        }

        let mut factor_frequencies = BTreeMap::new();
        for (&spacing, &seen) in &spacing_frequencies {
            for d in divisors(spacing) {
                *factor_frequencies.entry(d).or_insert(0) += seen;
            }
        }

        KasiskiResult {
            key_lengths: factor_frequencies.keys().copied().collect(),
            spacing_frequencies,
            factor_frequencies,
        }
    }

    /// Start offsets of each letter present in the text.
    pub fn letter_positions(&self) -> BTreeMap<char, Vec<usize>> {
        let mut out: BTreeMap<char, Vec<usize>> = BTreeMap::new();
        for (i, c) in self.text.chars().enumerate() {
            out.entry(c).or_default().push(i);
        }
        out
    }

    pub fn count_unique_patterns(&self, length: usize) -> usize {
        self.windows(length).map(|(_, w)| w).collect::<BTreeSet<_>>().len()
    }

    /// Repeated-pattern occurrences of length 2..=5 per letter of text.
    pub fn pattern_density(&self) -> f64 {
        if self.text.is_empty() {
            return 0.0;
        }
        let total: usize = self
            .find_repeating_patterns(2, 5)
            .iter()
            .map(PatternMatch::occurrences)
            .sum();
        total as f64 / self.text.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisors_include_self() {
        assert_eq!(divisors(12), vec![2, 3, 4, 6, 12]);
        assert_eq!(divisors(7), vec![7]);
        assert!(divisors(1).is_empty());
    }

    #[test]
    fn spacings_are_pairwise() {
        let p = PatternMatch {
            substring: "ABC".into(),
            positions: vec![0, 4, 10],
            length: 3,
        };
        assert_eq!(p.spacings().collect::<Vec<_>>(), vec![4, 10, 6]);
    }

    #[test]
    fn short_text_has_no_patterns() {
        let f = PatternFinder::new("ab");
        assert!(f.find_repeating_patterns(3, 10).is_empty());
        assert_eq!(f.count_unique_patterns(3), 0);
    }
}
