pub mod entropy;
pub mod frequency;
pub mod profile;

pub use self::entropy::{
    conditional_entropy, joint_entropy, mutual_information, normalized_entropy, relative_entropy,
    shannon_entropy, EntropyMetrics,
};
pub use self::frequency::{
    character_probabilities, chi_squared, index_of_coincidence, ngram_probabilities, LetterCounts,
};
pub use self::profile::{detect_possible_languages, detect_probable_language, LanguageProfile};

use std::collections::BTreeMap;

/// A discrete probability distribution keyed by symbol. Ordered so that
/// floating-point sums are reproducible run to run.
pub type Distribution<K> = BTreeMap<K, f64>;

/// Alphabetic characters only, case-folded to uppercase ASCII.
pub fn normalize_letters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
