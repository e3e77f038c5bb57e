/// Size of the Latin alphabet every statistic is computed over.
pub const ALPHABET_SIZE: usize = 26;

/// Reference English letter frequencies, A..=Z.
pub const ENGLISH_FREQUENCIES: [f64; ALPHABET_SIZE] = [
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, // A-E
    0.02228, 0.02015, 0.06094, 0.06966, 0.00153, // F-J
    0.00772, 0.04025, 0.02406, 0.06749, 0.07507, // K-O
    0.01929, 0.00095, 0.05987, 0.06327, 0.09056, // P-T
    0.02758, 0.00978, 0.02360, 0.00150, 0.01974, // U-Y
    0.00074, // Z
];

/// Relative frequencies of the ten most common English words.
pub const ENGLISH_WORD_FREQUENCIES: [(&str, f64); 10] = [
    ("the", 0.075),
    ("of", 0.038),
    ("and", 0.028),
    ("to", 0.022),
    ("a", 0.022),
    ("in", 0.017),
    ("that", 0.015),
    ("is", 0.014),
    ("it", 0.013),
    ("for", 0.012),
];

/// Words counted by the common-word signal.
pub const COMMON_WORDS: [&str; 20] = [
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at",
];

/// Expected index of coincidence for English monoalphabetic text.
pub const ENGLISH_IC: f64 = 0.066;

/// Index of coincidence of uniformly random letters (1/26).
pub const RANDOM_IC: f64 = 1.0 / ALPHABET_SIZE as f64;

/// Expected single-letter Shannon entropy of English, bits per letter.
pub const ENGLISH_ENTROPY: f64 = 4.1;

/// Number of multipliers coprime with 26.
pub const AFFINE_UNIT_COUNT: usize = 12;

/// Hard ceiling on exhaustive Vigenère key length (26^8 keys already).
pub const MAX_VIGENERE_KEY_LENGTH: usize = 8;

/// Number of nearest words returned by spelling suggestions.
pub const SUGGESTION_COUNT: usize = 5;

/// Default number of candidates kept by the ranker.
pub const DEFAULT_TOP_N: usize = 5;
