use super::frequency::{ngram_probabilities, LetterCounts};
use super::profile::LanguageProfile;
use super::{normalize_letters, Distribution};
use crate::error::{CfResult, CipherForgeError};
use serde::Serialize;
use std::collections::BTreeMap;

/// `-Σ p·log2(p)` over a distribution; zero-probability entries contribute 0.
pub fn entropy_of<K>(dist: &Distribution<K>) -> f64 {
    dist.values()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

fn entropy_of_counts<K>(counts: &BTreeMap<K, usize>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    counts
        .values()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum()
}

/// Single-letter Shannon entropy in bits. 0.0 for text without letters.
pub fn shannon_entropy(text: &str) -> f64 {
    LetterCounts::from_text(text).shannon_entropy()
}

/// Shannon entropy divided by `log2(len)`, where `len` is the letter count.
pub fn normalized_entropy(text: &str) -> CfResult<f64> {
    let lc = LetterCounts::from_text(text);
    if lc.total <= 1 {
        return Err(CipherForgeError::DegenerateInput(format!(
            "normalized entropy needs at least 2 letters, got {}",
            lc.total
        )));
    }
    Ok(lc.shannon_entropy() / (lc.total as f64).log2())
}

/// Letters of `a` and `b` paired position by position, up to the shorter.
fn aligned_pairs(a: &str, b: &str) -> (Vec<u8>, Vec<u8>) {
    let a = normalize_letters(a).into_bytes();
    let b = normalize_letters(b).into_bytes();
    let n = a.len().min(b.len());
    (a[..n].to_vec(), b[..n].to_vec())
}

/// `H(A, B)` over aligned letter pairs.
pub fn joint_entropy(a: &str, b: &str) -> f64 {
    let (a, b) = aligned_pairs(a, b);
    let mut counts: BTreeMap<(u8, u8), usize> = BTreeMap::new();
    for (&x, &y) in a.iter().zip(b.iter()) {
        *counts.entry((x, y)).or_insert(0) += 1;
    }
    entropy_of_counts(&counts, a.len())
}

/// `H(text | condition) = H(text, condition) − H(condition)` over aligned
/// letter pairs.
pub fn conditional_entropy(text: &str, condition: &str) -> f64 {
    let (_, cond) = aligned_pairs(text, condition);
    let cond = String::from_utf8_lossy(&cond);
    (joint_entropy(text, condition) - shannon_entropy(&cond)).max(0.0)
}

/// Entropy of each letter given the letter before it.
pub fn successor_entropy(text: &str) -> f64 {
    let letters = normalize_letters(text);
    if letters.len() < 2 {
        return 0.0;
    }
    conditional_entropy(&letters[1..], &letters[..letters.len() - 1])
}

/// `H(A) + H(B) − H(A, B)`, with both marginals taken over the same aligned
/// prefix as the joint term.
pub fn mutual_information(a: &str, b: &str) -> f64 {
    let (x, y) = aligned_pairs(a, b);
    let hx = shannon_entropy(&String::from_utf8_lossy(&x));
    let hy = shannon_entropy(&String::from_utf8_lossy(&y));
    (hx + hy - joint_entropy(a, b)).max(0.0)
}

/// Kullback-Leibler divergence `Σ p·log2(p/q)` over the support of `p`.
///
/// Terms where `q` is zero or missing are skipped rather than treated as
/// infinite, so the value is a lower bound in that case.
pub fn relative_entropy(p: &Distribution<char>, q: &Distribution<char>) -> f64 {
    p.iter()
        .filter_map(|(sym, &pp)| {
            let qq = q.get(sym).copied().unwrap_or(0.0);
            (pp > 0.0 && qq > 0.0).then(|| pp * (pp / qq).log2())
        })
        .sum()
}

/// `−Σ p·log2(q)`, skipping symbols `q` does not cover.
pub fn cross_entropy(p: &Distribution<char>, q: &Distribution<char>) -> f64 {
    p.iter()
        .filter_map(|(sym, &pp)| {
            let qq = q.get(sym).copied().unwrap_or(0.0);
            (pp > 0.0 && qq > 0.0).then(|| -pp * qq.log2())
        })
        .sum()
}

/// Block entropy of the `n`-gram distribution.
pub fn ngram_entropy(text: &str, n: usize) -> f64 {
    entropy_of(&ngram_probabilities(text, n))
}

/// Entropy of the next letter given the previous `order` letters,
/// estimated as `H(order+1 grams) − H(order grams)`.
pub fn markov_entropy(text: &str, order: usize) -> f64 {
    if order == 0 {
        return shannon_entropy(text);
    }
    (ngram_entropy(text, order + 1) - ngram_entropy(text, order)).max(0.0)
}

/// Single-letter entropy spread over the letter count.
pub fn entropy_rate(text: &str) -> f64 {
    let lc = LetterCounts::from_text(text);
    if lc.is_empty() {
        return 0.0;
    }
    lc.shannon_entropy() / lc.total as f64
}

/// Markov entropies for orders `1..=max_order`.
pub fn entropy_spectrum(text: &str, max_order: usize) -> Vec<f64> {
    (1..=max_order).map(|k| markov_entropy(text, k)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntropyMetrics {
    pub shannon: f64,
    /// `None` when the text has fewer than two letters.
    pub normalized: Option<f64>,
    pub conditional: f64,
    pub joint: f64,
    pub mutual_information: f64,
    pub relative_to_profile: f64,
    pub cross_to_profile: f64,
    /// `(n, H(n-grams))` for n = 1..=3.
    pub ngram_entropies: Vec<(usize, f64)>,
    pub entropy_rate: f64,
}

impl EntropyMetrics {
    /// Joint entropy and mutual information compare the first half of the
    /// letters against the second half.
    pub fn compute(text: &str, profile: &LanguageProfile) -> Self {
        let letters = normalize_letters(text);
        let (front, back) = letters.split_at(letters.len() / 2);
        let observed = LetterCounts::from_text(&letters).probabilities();
        let reference = profile.distribution();

        Self {
            shannon: shannon_entropy(&letters),
            normalized: normalized_entropy(&letters).ok(),
            conditional: successor_entropy(&letters),
            joint: joint_entropy(front, back),
            mutual_information: mutual_information(front, back),
            relative_to_profile: relative_entropy(&observed, &reference),
            cross_to_profile: cross_entropy(&observed, &reference),
            ngram_entropies: (1..=3).map(|n| (n, ngram_entropy(&letters, n))).collect(),
            entropy_rate: entropy_rate(&letters),
        }
    }
}
