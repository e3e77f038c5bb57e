pub mod builtin;
pub mod loader;

use crate::consts::{COMMON_WORDS, SUGGESTION_COUNT};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// Lowercase ASCII letters of `word`; everything else is dropped.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Read-only word lookups the scoring engine needs. Implementations own
/// their own case and punctuation normalisation.
pub trait WordSource: Send + Sync {
    fn contains_clean(&self, cleaned: &str) -> bool;

    fn is_word(&self, word: &str) -> bool {
        let cleaned = clean_word(word);
        !cleaned.is_empty() && self.contains_clean(&cleaned)
    }

    /// Whitespace-separated tokens that are dictionary words.
    fn count_matches(&self, text: &str) -> usize {
        text.split_whitespace().filter(|w| self.is_word(w)).count()
    }

    /// Tokens that are one of the twenty most common English words.
    fn score_common_words(&self, text: &str) -> usize {
        text.split_whitespace()
            .filter(|w| COMMON_WORDS.contains(&clean_word(w).as_str()))
            .count()
    }

    /// Tokens of `text`, as written, that are dictionary words.
    fn identify_valid_words(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|w| self.is_word(w))
            .map(str::to_string)
            .collect()
    }

    /// Percentage of tokens that are dictionary words. 0 for empty text.
    fn language_confidence(&self, text: &str) -> f64 {
        let tokens = text.split_whitespace().count();
        if tokens == 0 {
            return 0.0;
        }
        self.count_matches(text) as f64 / tokens as f64 * 100.0
    }

    /// Mean token length after stripping punctuation. Tokens made only of
    /// punctuation still count towards the number of words.
    fn average_word_length(&self, text: &str) -> f64 {
        let (total, count) = text.split_whitespace().fold((0usize, 0usize), |(t, n), w| {
            let len = w.chars().filter(|c| !c.is_ascii_punctuation()).count();
            (t + len, n + 1)
        });
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}

/// In-memory word set, loaded once and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl WordSource for Dictionary {
    fn contains_clean(&self, cleaned: &str) -> bool {
        self.words.contains(cleaned)
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::from_words(builtin::DEFAULT_WORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for w in words {
            dict.add_word(w.as_ref());
        }
        dict
    }

    /// Returns false if the word cleans to nothing or was already present.
    pub fn add_word(&mut self, word: &str) -> bool {
        let cleaned = clean_word(word);
        !cleaned.is_empty() && self.words.insert(cleaned)
    }

    pub fn remove_word(&mut self, word: &str) -> bool {
        self.words.remove(&clean_word(word))
    }

    pub fn extend(&mut self, other: Dictionary) {
        self.words.extend(other.words);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words, sorted.
    pub fn words(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.words.iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    /// Occurrences of each dictionary word in `text`.
    pub fn word_frequency(&self, text: &str) -> BTreeMap<String, usize> {
        let mut freq = BTreeMap::new();
        for token in text.split_whitespace() {
            let cleaned = clean_word(token);
            if self.words.contains(&cleaned) {
                *freq.entry(cleaned).or_insert(0) += 1;
            }
        }
        freq
    }

    /// Ties resolve to the alphabetically first word.
    pub fn most_frequent_word(&self, text: &str) -> Option<String> {
        self.word_frequency(text)
            .into_iter()
            .fold(None, |best: Option<(String, usize)>, (w, c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((w, c)),
            })
            .map(|(w, _)| w)
    }

    pub fn suggest_by_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = clean_word(prefix);
        self.words()
            .into_iter()
            .filter(|w| w.starts_with(&prefix))
            .map(str::to_string)
            .collect()
    }

    /// The closest words by edit distance, nearest first, ties alphabetical.
    pub fn suggest_corrections(&self, word: &str) -> Vec<String> {
        let target = clean_word(word);
        let mut scored: Vec<(usize, &str)> = self
            .words
            .iter()
            .map(|w| (levenshtein_distance(&target, w), w.as_str()))
            .collect();
        scored.sort_unstable();
        scored
            .into_iter()
            .take(SUGGESTION_COUNT)
            .map(|(_, w)| w.to_string())
            .collect()
    }

    /// Words whose similarity `1 − distance / max_len` to `word` is at
    /// least `threshold`. The sorted word list is split into `workers`
    /// disjoint slices scanned in parallel; results come back most similar
    /// first.
    pub fn find_similar_words(
        &self,
        word: &str,
        threshold: f64,
        workers: usize,
    ) -> Vec<(String, f64)> {
        let target = clean_word(word);
        let words = self.words();
        if words.is_empty() {
            return Vec::new();
        }
        let chunk = words.len().div_ceil(workers.max(1));

        let mut found: Vec<(String, f64)> = words
            .par_chunks(chunk)
            .map(|slice| {
                slice
                    .iter()
                    .filter_map(|w| {
                        let s = similarity(&target, w);
                        (s >= threshold).then(|| (w.to_string(), s))
                    })
                    .collect::<Vec<_>>()
            })
            .reduce(Vec::new, |mut a, b| {
                a.extend(b);
                a
            });

        found.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        found
    }
}

/// `1 − distance / max(len)`; two empty words are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}

/// Edit distance with unit insert, delete and substitute costs.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        cur[0] = i;
        for j in 1..=b.len() {
            cur[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j - 1].min(prev[j]).min(cur[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}
