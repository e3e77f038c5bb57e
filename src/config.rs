use crate::consts::{DEFAULT_TOP_N, ENGLISH_ENTROPY, ENGLISH_IC, MAX_VIGENERE_KEY_LENGTH};
use crate::error::{CfResult, CipherForgeError};
use crate::scorer::ScoringMode;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
    #[command(flatten)]
    pub kasiski: KasiskiParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, value_enum, default_value_t = ScoringMode::Basic)]
    pub mode: ScoringMode,
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,
    #[arg(long, default_value_t = 4)]
    pub max_key_length: usize,
    // 0 means "up to the ciphertext length"
    #[arg(long, default_value_t = 0)]
    pub max_columns: usize,
    #[arg(long, default_value_t = 4096)]
    pub batch_size: usize,
    #[arg(long)]
    pub max_keys: Option<usize>,
    #[arg(long)]
    pub time_limit_secs: Option<u64>,
    // 0 means "all available cores"
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kasiski: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            mode: ScoringMode::Basic,
            top_n: DEFAULT_TOP_N,
            max_key_length: 4,
            max_columns: 0,
            batch_size: 4096,
            max_keys: None,
            time_limit_secs: None,
            threads: 0,
            use_kasiski: true,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === BASIC ===
    #[arg(long, default_value_t = 5.0)]
    pub weight_dictionary_match: f64,
    #[arg(long, default_value_t = 3.0)]
    pub weight_common_word: f64,
    #[arg(long, default_value_t = 1.5)]
    pub weight_word_length: f64,

    // === ADVANCED (statistical distance) ===
    #[arg(long, default_value_t = 0.5)]
    pub penalty_chi_squared: f64,
    #[arg(long, default_value_t = 10.0)]
    pub penalty_ic: f64,
    #[arg(long, default_value_t = 1.0)]
    pub penalty_entropy: f64,
    #[arg(long, default_value_t = 1.0)]
    pub penalty_relative_entropy: f64,
    #[arg(long, default_value_t = ENGLISH_IC)]
    pub expected_ic: f64,
    #[arg(long, default_value_t = ENGLISH_ENTROPY)]
    pub expected_entropy: f64,

    // === ENTROPY BLEND ===
    #[arg(long, default_value_t = 0.5)]
    pub blend_match: f64,
    #[arg(long, default_value_t = 0.3)]
    pub blend_common: f64,
    #[arg(long, default_value_t = 0.1)]
    pub blend_length: f64,
    #[arg(long, default_value_t = 0.2)]
    pub blend_bigram_entropy: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight_dictionary_match: 5.0,
            weight_common_word: 3.0,
            weight_word_length: 1.5,
            penalty_chi_squared: 0.5,
            penalty_ic: 10.0,
            penalty_entropy: 1.0,
            penalty_relative_entropy: 1.0,
            expected_ic: ENGLISH_IC,
            expected_entropy: ENGLISH_ENTROPY,
            blend_match: 0.5,
            blend_common: 0.3,
            blend_length: 0.1,
            blend_bigram_entropy: 0.2,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KasiskiParams {
    #[arg(long, default_value_t = 3)]
    pub kasiski_min_length: usize,
    #[arg(long, default_value_t = 10)]
    pub kasiski_max_length: usize,
    #[arg(long, default_value_t = 2)]
    pub kasiski_min_spacing: usize,
    #[arg(long, default_value_t = 20)]
    pub kasiski_max_spacing: usize,
}

impl Default for KasiskiParams {
    fn default() -> Self {
        Self {
            kasiski_min_length: 3,
            kasiski_max_length: 10,
            kasiski_min_spacing: 2,
            kasiski_max_spacing: 20,
        }
    }
}

impl Config {
    pub fn validate(&self) -> CfResult<()> {
        let s = &self.search;
        if s.top_n == 0 {
            return Err(CipherForgeError::Config("top_n must be at least 1".into()));
        }
        if s.batch_size == 0 {
            return Err(CipherForgeError::Config(
                "batch_size must be at least 1".into(),
            ));
        }
        if s.max_key_length == 0 || s.max_key_length > MAX_VIGENERE_KEY_LENGTH {
            return Err(CipherForgeError::Config(format!(
                "max_key_length must be within 1..={}, got {}",
                MAX_VIGENERE_KEY_LENGTH, s.max_key_length
            )));
        }

        self.weights.validate()?;

        let k = &self.kasiski;
        if k.kasiski_min_length == 0 || k.kasiski_min_length > k.kasiski_max_length {
            return Err(CipherForgeError::Config(format!(
                "invalid Kasiski pattern length range {}..={}",
                k.kasiski_min_length, k.kasiski_max_length
            )));
        }
        if k.kasiski_min_spacing < 2 || k.kasiski_min_spacing > k.kasiski_max_spacing {
            return Err(CipherForgeError::Config(format!(
                "invalid Kasiski spacing range {}..={}",
                k.kasiski_min_spacing, k.kasiski_max_spacing
            )));
        }
        Ok(())
    }
}

impl ScoringWeights {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let weights: Self = serde_json::from_str(&content)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Dictionary and common-word weights must stay non-negative so that more
    /// real words never lower a score.
    pub fn validate(&self) -> CfResult<()> {
        let signals = [
            ("weight_dictionary_match", self.weight_dictionary_match),
            ("weight_common_word", self.weight_common_word),
            ("blend_match", self.blend_match),
            ("blend_common", self.blend_common),
        ];
        for (name, value) in signals {
            if value.is_nan() || value < 0.0 {
                return Err(CipherForgeError::Config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(weight_dictionary_match, "weight_dictionary_match");
        update_if_present!(weight_common_word, "weight_common_word");
        update_if_present!(weight_word_length, "weight_word_length");

        update_if_present!(penalty_chi_squared, "penalty_chi_squared");
        update_if_present!(penalty_ic, "penalty_ic");
        update_if_present!(penalty_entropy, "penalty_entropy");
        update_if_present!(penalty_relative_entropy, "penalty_relative_entropy");
        update_if_present!(expected_ic, "expected_ic");
        update_if_present!(expected_entropy, "expected_entropy");

        update_if_present!(blend_match, "blend_match");
        update_if_present!(blend_common, "blend_common");
        update_if_present!(blend_length, "blend_length");
        update_if_present!(blend_bigram_entropy, "blend_bigram_entropy");
    }
}
