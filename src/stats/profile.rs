use super::Distribution;
use crate::consts::{ALPHABET_SIZE, ENGLISH_FREQUENCIES, ENGLISH_WORD_FREQUENCIES};
use crate::error::{CfResult, CipherForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use tracing::{debug, warn};

/// Reference letter (and optional word) frequencies for a language.
/// Shared read-only across every candidate evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub name: String,
    pub letter_frequencies: [f64; ALPHABET_SIZE],
    pub word_frequencies: BTreeMap<String, f64>,
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::english()
    }
}

impl LanguageProfile {
    pub fn english() -> Self {
        Self {
            name: "english".to_string(),
            letter_frequencies: ENGLISH_FREQUENCIES,
            word_frequencies: ENGLISH_WORD_FREQUENCIES
                .iter()
                .map(|&(w, f)| (w.to_string(), f))
                .collect(),
        }
    }

    /// Loads a two-column `symbol,frequency` CSV. Single letters fill the
    /// letter table, longer symbols the word table.
    pub fn load_from_file(path: &str) -> CfResult<Self> {
        let file = File::open(path).map_err(|e| {
            CipherForgeError::Config(format!("Could not open profile '{}': {}", path, e))
        })?;
        let name = std::path::Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();
        Self::from_reader(&name, file)
    }

    pub fn from_reader<R: Read>(name: &str, reader: R) -> CfResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut letters = [0.0; ALPHABET_SIZE];
        let mut words = BTreeMap::new();
        let mut skipped = 0;

        for result in rdr.records() {
            let rec = result?;
            if rec.len() < 2 {
                skipped += 1;
                continue;
            }
            let symbol = rec[0].to_ascii_lowercase();
            let freq: f64 = match rec[1].parse() {
                Ok(v) if v >= 0.0 => v,
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            if symbol.is_empty() || !symbol.bytes().all(|b| b.is_ascii_lowercase()) {
                skipped += 1;
            } else if symbol.len() == 1 {
                letters[(symbol.as_bytes()[0] - b'a') as usize] += freq;
            } else {
                words.insert(symbol, freq);
            }
        }

        if skipped > 0 {
            warn!(profile = name, skipped, "Skipped unreadable profile rows");
        }

        let total: f64 = letters.iter().sum();
        if total <= 0.0 {
            return Err(CipherForgeError::Validation(format!(
                "profile '{}' defines no letter frequencies",
                name
            )));
        }
        for f in letters.iter_mut() {
            *f /= total;
        }
        debug!(profile = name, words = words.len(), "Loaded language profile");

        Ok(Self {
            name: name.to_string(),
            letter_frequencies: letters,
            word_frequencies: words,
        })
    }

    pub fn frequency(&self, letter: char) -> f64 {
        match letter.to_ascii_uppercase() {
            c @ 'A'..='Z' => self.letter_frequencies[(c as u8 - b'A') as usize],
            _ => 0.0,
        }
    }

    /// The letter table as an uppercase-keyed distribution.
    pub fn distribution(&self) -> Distribution<char> {
        self.letter_frequencies
            .iter()
            .enumerate()
            .map(|(i, &f)| ((b'A' + i as u8) as char, f))
            .collect()
    }

    /// Letters ordered by reference frequency, most common first.
    pub fn letters_by_frequency(&self) -> Vec<char> {
        let mut idx: Vec<usize> = (0..ALPHABET_SIZE).collect();
        idx.sort_by(|&a, &b| {
            self.letter_frequencies[b]
                .total_cmp(&self.letter_frequencies[a])
                .then(a.cmp(&b))
        });
        idx.into_iter().map(|i| (b'A' + i as u8) as char).collect()
    }

    /// Sum of the profile frequencies of every word in `text` found in the
    /// word table.
    pub fn word_frequency_score(&self, text: &str) -> f64 {
        text.split_whitespace()
            .map(|w| {
                w.chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .map(|c| c.to_ascii_lowercase())
                    .collect::<String>()
            })
            .filter_map(|w| self.word_frequencies.get(&w))
            .sum()
    }
}

/// Ranks candidate languages by the mean word-table frequency of the tokens
/// in `text`, most likely first. Text without tokens scores 0 everywhere.
pub fn detect_possible_languages(text: &str, profiles: &[LanguageProfile]) -> Vec<(String, f64)> {
    let tokens = text.split_whitespace().count();
    let mut ranked: Vec<(String, f64)> = profiles
        .iter()
        .map(|p| {
            let score = if tokens == 0 {
                0.0
            } else {
                p.word_frequency_score(text) / tokens as f64
            };
            (p.name.clone(), score)
        })
        .collect();
    // Stable: equal scores keep profile order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Name of the best-scoring language, or `None` when nothing scores above 0.
pub fn detect_probable_language(text: &str, profiles: &[LanguageProfile]) -> Option<String> {
    detect_possible_languages(text, profiles)
        .into_iter()
        .next()
        .filter(|(_, score)| *score > 0.0)
        .map(|(name, _)| name)
}
