use crate::dictionary::WordSource;
use crate::stats::entropy::{ngram_entropy, successor_entropy};
use crate::stats::{LanguageProfile, LetterCounts};
use serde::Serialize;

/// Every signal the scoring engine reads, computed once per decryption.
/// Pure function of the text, the word source and the reference profile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSet {
    // Dictionary signals
    pub dictionary_match_count: usize,
    pub common_word_score: usize,
    pub average_word_length: f64,

    // Letter statistics
    pub letter_count: usize,
    pub index_of_coincidence: f64,
    pub chi_squared: f64,
    pub shannon_entropy: f64,
    pub conditional_entropy: f64,
    pub relative_entropy: f64,
    pub bigram_entropy: f64,
}

impl FeatureSet {
    pub fn extract<W: WordSource + ?Sized>(
        text: &str,
        words: &W,
        profile: &LanguageProfile,
    ) -> Self {
        let counts = LetterCounts::from_text(text);
        let reference = &profile.letter_frequencies;

        Self {
            dictionary_match_count: words.count_matches(text),
            common_word_score: words.score_common_words(text),
            average_word_length: words.average_word_length(text),

            letter_count: counts.total,
            index_of_coincidence: counts.index_of_coincidence(),
            chi_squared: counts.chi_squared(reference),
            shannon_entropy: counts.shannon_entropy(),
            conditional_entropy: successor_entropy(text),
            relative_entropy: counts.relative_entropy(reference),
            bigram_entropy: ngram_entropy(text, 2),
        }
    }

    /// Chi-squared per letter; 0 when there are no letters.
    pub fn chi_squared_per_letter(&self) -> f64 {
        if self.letter_count == 0 {
            0.0
        } else {
            self.chi_squared / self.letter_count as f64
        }
    }
}
