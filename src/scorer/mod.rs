pub mod candidate;
pub mod features;

pub use self::candidate::{Candidate, CandidateFailure};
pub use self::features::FeatureSet;

use crate::ciphers::{self, CipherKey};
use crate::config::ScoringWeights;
use crate::dictionary::WordSource;
use crate::error::CfResult;
use crate::stats::LanguageProfile;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Dictionary matches, common words and word length.
    #[default]
    Basic,
    /// Basic minus penalties for implausible letter statistics.
    Advanced,
    /// Small-weight blend that subtracts bigram entropy.
    Entropy,
}

/// Reduces a feature set to one comparable number. Higher is more
/// plausible in every mode.
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    pub weights: ScoringWeights,
    pub mode: ScoringMode,
}

impl CompositeScorer {
    pub fn new(weights: ScoringWeights, mode: ScoringMode) -> Self {
        Self { weights, mode }
    }

    #[inline]
    fn basic(&self, f: &FeatureSet) -> f64 {
        let w = &self.weights;
        w.weight_dictionary_match * f.dictionary_match_count as f64
            + w.weight_common_word * f.common_word_score as f64
            + w.weight_word_length * f.average_word_length
    }

    pub fn score(&self, f: &FeatureSet) -> f64 {
        let w = &self.weights;
        match self.mode {
            ScoringMode::Basic => self.basic(f),
            ScoringMode::Advanced => {
                self.basic(f)
                    - w.penalty_chi_squared * f.chi_squared_per_letter()
                    - w.penalty_ic * (f.index_of_coincidence - w.expected_ic).abs()
                    - w.penalty_entropy * (f.shannon_entropy - w.expected_entropy).abs()
                    - w.penalty_relative_entropy * f.relative_entropy
            }
            ScoringMode::Entropy => {
                w.blend_match * f.dictionary_match_count as f64
                    + w.blend_common * f.common_word_score as f64
                    + w.blend_length * f.average_word_length
                    - w.blend_bigram_entropy * f.bigram_entropy
            }
        }
    }
}

/// Everything one candidate evaluation reads. Shared immutably by every
/// worker.
pub struct Evaluator<W: WordSource + ?Sized> {
    pub ciphertext: String,
    pub words: Arc<W>,
    pub profile: Arc<LanguageProfile>,
    pub scorer: CompositeScorer,
}

impl<W: WordSource + ?Sized> Evaluator<W> {
    pub fn new(
        ciphertext: &str,
        words: Arc<W>,
        profile: Arc<LanguageProfile>,
        scorer: CompositeScorer,
    ) -> Self {
        Self {
            ciphertext: ciphertext.to_string(),
            words,
            profile,
            scorer,
        }
    }

    /// Decrypt, extract features, score. Invalid keys are rejected before
    /// any decryption is attempted.
    pub fn evaluate(&self, ordinal: usize, key: CipherKey) -> Result<Candidate, CandidateFailure> {
        match self.try_evaluate(&key) {
            Ok((plaintext, features, score)) => Ok(Candidate {
                ordinal,
                key,
                plaintext,
                features,
                score,
            }),
            Err(e) => Err(CandidateFailure {
                ordinal,
                key,
                reason: e.to_string(),
            }),
        }
    }

    fn try_evaluate(&self, key: &CipherKey) -> CfResult<(String, FeatureSet, f64)> {
        key.validate()?;
        let plaintext = ciphers::decrypt(&self.ciphertext, key)?;
        let features = FeatureSet::extract(&plaintext, self.words.as_ref(), &self.profile);
        let score = self.scorer.score(&features);
        Ok((plaintext, features, score))
    }
}
