use crate::ciphers::CipherFamily;
use crate::config::Config;
use crate::dictionary::{Dictionary, WordSource};
use crate::error::{CfResult, CipherForgeError};
use crate::keyspace::KeySpace;
use crate::patterns::{KasiskiResult, PatternFinder, PatternMatch};
use crate::scorer::{CompositeScorer, Evaluator};
use crate::search::{Cracker, NoProgress, ProgressCallback, SearchOptions, SearchReport};
use crate::stats::frequency::{
    analyze_character_frequencies, analyze_ngrams, compare_to_profile,
    periodic_index_of_coincidence, suggest_substitutions, FrequencyData, NGramData,
};
use crate::stats::{detect_possible_languages, EntropyMetrics, LanguageProfile, LetterCounts};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

const TOP_NGRAMS: usize = 10;
const TOP_PATTERNS: usize = 10;

/// Everything a crack or an analysis needs, loaded once. The dictionary and
/// profile are shared read-only with every worker.
pub struct Session {
    pub dictionary: Arc<Dictionary>,
    pub profile: Arc<LanguageProfile>,
    /// Candidates for language detection. Starts with the scoring profile.
    pub languages: Vec<LanguageProfile>,
    pub config: Config,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub letter_count: usize,
    pub frequencies: Vec<FrequencyData>,
    pub bigrams: Vec<NGramData>,
    pub trigrams: Vec<NGramData>,
    pub index_of_coincidence: f64,
    pub chi_squared: f64,
    pub profile_distance: f64,
    pub entropy: EntropyMetrics,
    pub repeated_patterns: Vec<PatternMatch>,
    pub kasiski: KasiskiResult,
    /// `(period, mean column IC)` for each period up to `max_key_length`.
    pub periodic_ic: Vec<(usize, f64)>,
    pub substitutions: Vec<(char, char)>,
    /// Percentage of tokens found in the dictionary.
    pub language_confidence: f64,
    pub valid_words: Vec<String>,
    /// `(language, mean word frequency)`, most likely first.
    pub languages: Vec<(String, f64)>,
}

impl Session {
    pub fn new(dictionary: Dictionary, profile: LanguageProfile, config: Config) -> CfResult<Self> {
        config.validate()?;
        Ok(Self {
            dictionary: Arc::new(dictionary),
            languages: vec![profile.clone()],
            profile: Arc::new(profile),
            config,
        })
    }

    /// Adds a language for detection. A profile with an already known name
    /// replaces the earlier one.
    pub fn add_language_profile(&mut self, profile: LanguageProfile) {
        match self.languages.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.languages.push(profile),
        }
    }

    pub fn with_defaults() -> CfResult<Self> {
        Self::new(
            Dictionary::builtin(),
            LanguageProfile::english(),
            Config::default(),
        )
    }

    fn check_input(ciphertext: &str) -> CfResult<()> {
        if ciphertext.is_empty() {
            return Err(CipherForgeError::EmptyInput(
                "ciphertext is empty".to_string(),
            ));
        }
        if LetterCounts::from_text(ciphertext).is_empty() {
            warn!("Ciphertext contains no letters; every statistic will be zero");
        }
        Ok(())
    }

    /// Kasiski hint for Vigenère when enabled, `None` otherwise.
    fn hint_for(&self, family: CipherFamily, ciphertext: &str) -> Option<KasiskiResult> {
        if family != CipherFamily::Vigenere || !self.config.search.use_kasiski {
            return None;
        }
        let result = PatternFinder::new(ciphertext).kasiski_examination(&self.config.kasiski);
        if result.is_empty() {
            info!("Kasiski found no repeated patterns; trying lengths in order");
        } else {
            info!(lengths = ?result.ranked_key_lengths(), "Kasiski key length hint");
        }
        Some(result)
    }

    pub fn keyspace(&self, ciphertext: &str, family: CipherFamily) -> CfResult<KeySpace> {
        let hint = self.hint_for(family, ciphertext);
        KeySpace::for_family(
            family,
            &self.config.search,
            ciphertext,
            &self.dictionary,
            hint.as_ref(),
        )
    }

    /// Enumerates the family's keyspace and ranks every decryption.
    ///
    /// A zero-length ciphertext is an `EmptyInput` error since there is no
    /// candidate to rank. Ciphertext that has characters but no letters is
    /// still searched; a warning is logged and every letter statistic is 0.
    pub fn crack(&self, ciphertext: &str, family: CipherFamily) -> CfResult<SearchReport> {
        self.crack_with(ciphertext, family, NoProgress)
    }

    pub fn crack_with<CB: ProgressCallback>(
        &self,
        ciphertext: &str,
        family: CipherFamily,
        callback: CB,
    ) -> CfResult<SearchReport> {
        Self::check_input(ciphertext)?;
        let keyspace = self.keyspace(ciphertext, family)?;
        info!(%family, mode = %self.config.search.mode, "Cracking");
        self.search(ciphertext, &keyspace, callback)
    }

    /// Runs the engine over an arbitrary keyspace.
    pub fn search<CB: ProgressCallback>(
        &self,
        ciphertext: &str,
        keyspace: &KeySpace,
        callback: CB,
    ) -> CfResult<SearchReport> {
        let scorer = CompositeScorer::new(self.config.weights.clone(), self.config.search.mode);
        let evaluator = Evaluator::new(
            ciphertext,
            self.dictionary.clone(),
            self.profile.clone(),
            scorer,
        );
        Cracker::new(evaluator, SearchOptions::from(&self.config)).run(keyspace, callback)
    }

    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let counts = LetterCounts::from_text(text);
        if counts.is_empty() {
            warn!("Text contains no letters; every statistic will be zero");
        }
        let finder = PatternFinder::new(text);
        let kasiski = &self.config.kasiski;
        let mut repeated_patterns =
            finder.find_repeating_patterns(kasiski.kasiski_min_length, kasiski.kasiski_max_length);
        repeated_patterns.truncate(TOP_PATTERNS);

        let mut bigrams = analyze_ngrams(text, 2);
        bigrams.truncate(TOP_NGRAMS);
        let mut trigrams = analyze_ngrams(text, 3);
        trigrams.truncate(TOP_NGRAMS);

        TextAnalysis {
            letter_count: counts.total,
            frequencies: analyze_character_frequencies(text, &self.profile),
            bigrams,
            trigrams,
            index_of_coincidence: counts.index_of_coincidence(),
            chi_squared: counts.chi_squared(&self.profile.letter_frequencies),
            profile_distance: compare_to_profile(text, &self.profile),
            entropy: EntropyMetrics::compute(text, &self.profile),
            repeated_patterns,
            kasiski: finder.kasiski_examination(kasiski),
            periodic_ic: (1..=self.config.search.max_key_length)
                .map(|p| (p, periodic_index_of_coincidence(text, p)))
                .collect(),
            substitutions: suggest_substitutions(text, &self.profile),
            language_confidence: self.dictionary.language_confidence(text),
            valid_words: self.dictionary.identify_valid_words(text),
            languages: detect_possible_languages(text, &self.languages),
        }
    }
}
