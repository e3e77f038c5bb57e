use super::profile::LanguageProfile;
use super::{normalize_letters, Distribution};
use crate::consts::ALPHABET_SIZE;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-letter counts of the alphabetic characters of a text (case-folded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterCounts {
    pub counts: [usize; ALPHABET_SIZE],
    pub total: usize,
}

impl LetterCounts {
    pub fn from_text(text: &str) -> Self {
        let mut counts = [0usize; ALPHABET_SIZE];
        let mut total = 0;
        for b in text.bytes() {
            if b.is_ascii_alphabetic() {
                counts[(b.to_ascii_uppercase() - b'A') as usize] += 1;
                total += 1;
            }
        }
        Self { counts, total }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Observed letters only; empty when there are no letters.
    pub fn probabilities(&self) -> Distribution<char> {
        let mut out = BTreeMap::new();
        if self.total == 0 {
            return out;
        }
        let n = self.total as f64;
        for (i, &c) in self.counts.iter().enumerate() {
            if c > 0 {
                out.insert((b'A' + i as u8) as char, c as f64 / n);
            }
        }
        out
    }

    pub fn index_of_coincidence(&self) -> f64 {
        if self.total <= 1 {
            return 0.0;
        }
        let n = self.total as f64;
        let sum: f64 = self
            .counts
            .iter()
            .map(|&f| (f as f64) * (f as f64 - 1.0))
            .sum();
        sum / (n * (n - 1.0))
    }

    pub fn chi_squared(&self, reference: &[f64; ALPHABET_SIZE]) -> f64 {
        let n = self.total as f64;
        let mut chi = 0.0;
        for (i, &observed) in self.counts.iter().enumerate() {
            let expected = reference[i] * n;
            if expected > 0.0 {
                let diff = observed as f64 - expected;
                chi += diff * diff / expected;
            }
        }
        chi
    }

    pub fn shannon_entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = self.total as f64;
        self.counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / n;
                -p * p.log2()
            })
            .sum()
    }

    /// Kullback-Leibler divergence from `reference`, over observed letters.
    /// Letters the reference gives zero weight are skipped.
    pub fn relative_entropy(&self, reference: &[f64; ALPHABET_SIZE]) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = self.total as f64;
        let mut d = 0.0;
        for (i, &c) in self.counts.iter().enumerate() {
            let q = reference[i];
            if c > 0 && q > 0.0 {
                let p = c as f64 / n;
                d += p * (p / q).log2();
            }
        }
        d
    }
}

pub fn character_probabilities(text: &str) -> Distribution<char> {
    LetterCounts::from_text(text).probabilities()
}

/// Sliding window of width `n`, step 1, over the normalised letters.
pub fn ngram_counts(text: &str, n: usize) -> BTreeMap<String, usize> {
    let letters = normalize_letters(text);
    let mut counts = BTreeMap::new();
    if n == 0 || letters.len() < n {
        return counts;
    }
    for i in 0..=letters.len() - n {
        *counts.entry(letters[i..i + n].to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn ngram_probabilities(text: &str, n: usize) -> Distribution<String> {
    let counts = ngram_counts(text, n);
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(k, c)| (k, c as f64 / total as f64))
        .collect()
}

pub fn index_of_coincidence(text: &str) -> f64 {
    LetterCounts::from_text(text).index_of_coincidence()
}

pub fn chi_squared(text: &str, reference: &[f64; ALPHABET_SIZE]) -> f64 {
    LetterCounts::from_text(text).chi_squared(reference)
}

/// Mean index of coincidence of the `period` interleaved columns of the text.
/// Close to the English value when `period` is a multiple of a Vigenère key
/// length.
pub fn periodic_index_of_coincidence(text: &str, period: usize) -> f64 {
    if period == 0 {
        return 0.0;
    }
    let letters = normalize_letters(text);
    let bytes = letters.as_bytes();
    let mut total = 0.0;
    for col in 0..period {
        let column: String = bytes
            .iter()
            .skip(col)
            .step_by(period)
            .map(|&b| b as char)
            .collect();
        total += index_of_coincidence(&column);
    }
    total / period as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyData {
    pub letter: char,
    pub count: usize,
    pub frequency: f64,
    pub expected: f64,
    pub deviation: f64,
}

pub fn analyze_character_frequencies(text: &str, profile: &LanguageProfile) -> Vec<FrequencyData> {
    let lc = LetterCounts::from_text(text);
    let mut out: Vec<FrequencyData> = lc
        .counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(i, &count)| {
            let frequency = count as f64 / lc.total as f64;
            let expected = profile.letter_frequencies[i];
            FrequencyData {
                letter: (b'A' + i as u8) as char,
                count,
                frequency,
                expected,
                deviation: (frequency - expected).abs(),
            }
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.letter.cmp(&b.letter)));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NGramData {
    pub sequence: String,
    pub count: usize,
    pub probability: f64,
    pub positions: Vec<usize>,
}

pub fn analyze_ngrams(text: &str, n: usize) -> Vec<NGramData> {
    let letters = normalize_letters(text);
    if n == 0 || letters.len() < n {
        return Vec::new();
    }
    let windows = letters.len() - n + 1;
    let mut positions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for i in 0..windows {
        positions.entry(&letters[i..i + n]).or_default().push(i);
    }
    let mut out: Vec<NGramData> = positions
        .into_iter()
        .map(|(seq, pos)| NGramData {
            sequence: seq.to_string(),
            count: pos.len(),
            probability: pos.len() as f64 / windows as f64,
            positions: pos,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.sequence.cmp(&b.sequence)));
    out
}

/// Pairs observed letters (most frequent first) with the profile's letters
/// in the same rank order.
pub fn suggest_substitutions(text: &str, profile: &LanguageProfile) -> Vec<(char, char)> {
    let observed = analyze_character_frequencies(text, profile);
    let expected = profile.letters_by_frequency();
    observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o.letter, e))
        .collect()
}

/// L1 distance between observed letter frequencies and the profile.
pub fn compare_to_profile(text: &str, profile: &LanguageProfile) -> f64 {
    let lc = LetterCounts::from_text(text);
    let n = lc.total.max(1) as f64;
    lc.counts
        .iter()
        .zip(profile.letter_frequencies.iter())
        .map(|(&c, &q)| (c as f64 / n - q).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ignore_case_and_punctuation() {
        let lc = LetterCounts::from_text("Aa, b!");
        assert_eq!(lc.total, 3);
        assert_eq!(lc.counts[0], 2);
        assert_eq!(lc.counts[1], 1);
    }

    #[test]
    fn ngram_windows() {
        let p = ngram_probabilities("abab", 2);
        assert_eq!(p.len(), 2);
        assert!((p["AB"] - 2.0 / 3.0).abs() < 1e-12);
        assert!((p["BA"] - 1.0 / 3.0).abs() < 1e-12);
        assert!(ngram_probabilities("ab", 3).is_empty());
    }
}
