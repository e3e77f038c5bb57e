use crate::ciphers::{affine, CipherFamily, CipherKey};
use crate::config::SearchParams;
use crate::consts::{AFFINE_UNIT_COUNT, ALPHABET_SIZE, MAX_VIGENERE_KEY_LENGTH};
use crate::dictionary::Dictionary;
use crate::error::{CfResult, CipherForgeError};
use crate::patterns::KasiskiResult;

/// A finite, ordered set of candidate keys for one cipher family.
///
/// `iter()` never decrypts or scores anything, and may be called again to
/// restart from the first key. The iteration order is the tie-break order
/// used when ranking equal scores.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySpace {
    /// Shifts 0..=25.
    Caesar,
    /// Invertible `(a, b)` pairs, `a` outer and `b` inner, both ascending.
    Affine,
    /// Every A..Z string of each length in `lengths`, in that length order.
    Vigenere { lengths: Vec<usize> },
    /// Column counts `2..=max_columns`.
    Transposition { max_columns: usize },
    /// Dictionary attack: one candidate per keyword.
    Playfair { keywords: Vec<String> },
    /// Caller-supplied keys, tried as given.
    Explicit(Vec<CipherKey>),
}

pub type KeyIter<'a> = Box<dyn Iterator<Item = CipherKey> + Send + 'a>;

impl KeySpace {
    pub fn vigenere(max_len: usize) -> Self {
        Self::Vigenere {
            lengths: (1..=max_len).collect(),
        }
    }

    /// Kasiski-ranked lengths first, then every remaining length up to
    /// `max_len` in ascending order. No length is dropped.
    pub fn vigenere_with_hint(max_len: usize, hint: &KasiskiResult) -> Self {
        let mut lengths: Vec<usize> = hint
            .ranked_key_lengths()
            .into_iter()
            .filter(|&l| l >= 1 && l <= max_len)
            .collect();
        for l in 1..=max_len {
            if !lengths.contains(&l) {
                lengths.push(l);
            }
        }
        Self::Vigenere { lengths }
    }

    pub fn for_family(
        family: CipherFamily,
        params: &SearchParams,
        ciphertext: &str,
        dictionary: &Dictionary,
        hint: Option<&KasiskiResult>,
    ) -> CfResult<Self> {
        Ok(match family {
            CipherFamily::Caesar => Self::Caesar,
            CipherFamily::Affine => Self::Affine,
            CipherFamily::Vigenere => {
                let max = params.max_key_length;
                if max == 0 || max > MAX_VIGENERE_KEY_LENGTH {
                    return Err(CipherForgeError::Config(format!(
                        "max_key_length must be in 1..={}, got {}",
                        MAX_VIGENERE_KEY_LENGTH, max
                    )));
                }
                match hint {
                    Some(h) if !h.is_empty() => Self::vigenere_with_hint(max, h),
                    _ => Self::vigenere(max),
                }
            }
            CipherFamily::Transposition => Self::Transposition {
                max_columns: if params.max_columns == 0 {
                    ciphertext.chars().count()
                } else {
                    params.max_columns
                },
            },
            CipherFamily::Playfair => Self::Playfair {
                keywords: dictionary
                    .words()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
        })
    }

    pub fn iter(&self) -> KeyIter<'_> {
        match self {
            Self::Caesar => Box::new((0..ALPHABET_SIZE as u8).map(CipherKey::Shift)),
            Self::Affine => Box::new(affine::multiplicative_units().into_iter().flat_map(
                |a| (0..ALPHABET_SIZE as u8).map(move |b| CipherKey::Affine { a, b }),
            )),
            Self::Vigenere { lengths } => Box::new(
                lengths
                    .iter()
                    .flat_map(|&len| VigenereKeys::new(len).map(CipherKey::Keyword)),
            ),
            Self::Transposition { max_columns } => {
                Box::new((2..=*max_columns).map(CipherKey::Columns))
            }
            Self::Playfair { keywords } => {
                Box::new(keywords.iter().cloned().map(CipherKey::Playfair))
            }
            Self::Explicit(keys) => Box::new(keys.iter().cloned()),
        }
    }

    /// Number of keys `iter()` yields, saturating at `u64::MAX`.
    pub fn cardinality(&self) -> u64 {
        match self {
            Self::Caesar => ALPHABET_SIZE as u64,
            Self::Affine => (AFFINE_UNIT_COUNT * ALPHABET_SIZE) as u64,
            Self::Vigenere { lengths } => lengths.iter().fold(0u64, |acc, &len| {
                let n = u32::try_from(len)
                    .ok()
                    .and_then(|l| (ALPHABET_SIZE as u64).checked_pow(l))
                    .unwrap_or(u64::MAX);
                acc.saturating_add(n)
            }),
            Self::Transposition { max_columns } => max_columns.saturating_sub(1) as u64,
            Self::Playfair { keywords } => keywords.len() as u64,
            Self::Explicit(keys) => keys.len() as u64,
        }
    }
}

/// Advances an uppercase key like an odometer: the rightmost letter steps
/// A→Z and carries left. Returns false once every position has wrapped.
pub fn increment_key(key: &mut [u8]) -> bool {
    for b in key.iter_mut().rev() {
        if *b < b'Z' {
            *b += 1;
            return true;
        }
        *b = b'A';
    }
    false
}

/// All uppercase strings of one length, lexicographic.
struct VigenereKeys {
    current: Vec<u8>,
    done: bool,
}

impl VigenereKeys {
    fn new(len: usize) -> Self {
        Self {
            current: vec![b'A'; len],
            done: len == 0,
        }
    }
}

impl Iterator for VigenereKeys {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let out = String::from_utf8_lossy(&self.current).into_owned();
        self.done = !increment_key(&mut self.current);
        Some(out)
    }
}
