pub mod affine;
pub mod caesar;
pub mod playfair;
pub mod transposition;
pub mod vigenere;

use crate::consts::ALPHABET_SIZE;
use crate::error::{CfResult, CipherForgeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CipherFamily {
    Caesar,
    Affine,
    Vigenere,
    Transposition,
    Playfair,
}

/// A key for one cipher family. The variant carries the family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CipherKey {
    Shift(u8),
    Affine { a: u8, b: u8 },
    Keyword(String),
    Columns(usize),
    Playfair(String),
}

impl CipherKey {
    pub fn family(&self) -> CipherFamily {
        match self {
            Self::Shift(_) => CipherFamily::Caesar,
            Self::Affine { .. } => CipherFamily::Affine,
            Self::Keyword(_) => CipherFamily::Vigenere,
            Self::Columns(_) => CipherFamily::Transposition,
            Self::Playfair(_) => CipherFamily::Playfair,
        }
    }

    /// Parses the textual key form used on the command line.
    ///
    /// Affine keys are written `a,b`; every other family takes a single token.
    pub fn parse(family: CipherFamily, raw: &str) -> CfResult<Self> {
        let raw = raw.trim();
        let bad = |what: &str| CipherForgeError::InvalidKey(format!("{} key '{}'", what, raw));
        match family {
            CipherFamily::Caesar => {
                let shift: i64 = raw.parse().map_err(|_| bad("caesar"))?;
                Ok(Self::Shift(shift.rem_euclid(ALPHABET_SIZE as i64) as u8))
            }
            CipherFamily::Affine => {
                let (a, b) = raw.split_once(',').ok_or_else(|| bad("affine"))?;
                let a: i64 = a.trim().parse().map_err(|_| bad("affine"))?;
                let b: i64 = b.trim().parse().map_err(|_| bad("affine"))?;
                let key = Self::Affine {
                    a: a.rem_euclid(ALPHABET_SIZE as i64) as u8,
                    b: b.rem_euclid(ALPHABET_SIZE as i64) as u8,
                };
                key.validate()?;
                Ok(key)
            }
            CipherFamily::Vigenere => {
                let key = Self::Keyword(raw.to_ascii_uppercase());
                key.validate()?;
                Ok(key)
            }
            CipherFamily::Transposition => {
                let columns: usize = raw.parse().map_err(|_| bad("transposition"))?;
                let key = Self::Columns(columns);
                key.validate()?;
                Ok(key)
            }
            CipherFamily::Playfair => {
                let key = Self::Playfair(raw.to_string());
                key.validate()?;
                Ok(key)
            }
        }
    }

    /// Rejects keys that cannot be used for decryption.
    pub fn validate(&self) -> CfResult<()> {
        match self {
            Self::Shift(_) => Ok(()),
            Self::Affine { a, .. } => affine::mod_inverse(*a as i64, ALPHABET_SIZE as i64)
                .map(|_| ())
                .ok_or_else(|| {
                    CipherForgeError::InvalidKey(format!(
                        "affine multiplier {} is not coprime with 26",
                        a
                    ))
                }),
            Self::Keyword(k) => vigenere::check_key(k),
            Self::Columns(c) => transposition::check_key(*c),
            Self::Playfair(k) => playfair::check_key(k),
        }
    }

    /// Draws a valid key for the family.
    pub fn random(family: CipherFamily, rng: &mut fastrand::Rng) -> Self {
        match family {
            CipherFamily::Caesar => Self::Shift(rng.u8(1..26)),
            CipherFamily::Affine => {
                let units = affine::multiplicative_units();
                Self::Affine {
                    a: units[rng.usize(..units.len())],
                    b: rng.u8(0..26),
                }
            }
            CipherFamily::Vigenere => {
                let len = rng.usize(3..=6);
                Self::Keyword((0..len).map(|_| rng.uppercase()).collect())
            }
            CipherFamily::Transposition => Self::Columns(rng.usize(2..=9)),
            CipherFamily::Playfair => {
                let len = rng.usize(5..=8);
                Self::Playfair((0..len).map(|_| rng.lowercase()).collect())
            }
        }
    }
}

impl fmt::Display for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(s) => write!(f, "{}", s),
            Self::Affine { a, b } => write!(f, "{},{}", a, b),
            Self::Keyword(k) => write!(f, "{}", k),
            Self::Columns(c) => write!(f, "{}", c),
            Self::Playfair(k) => write!(f, "{}", k),
        }
    }
}

pub fn encrypt(text: &str, key: &CipherKey) -> CfResult<String> {
    match key {
        CipherKey::Shift(s) => Ok(caesar::encrypt(text, *s)),
        CipherKey::Affine { a, b } => affine::encrypt(text, *a, *b),
        CipherKey::Keyword(k) => vigenere::encrypt(text, k),
        CipherKey::Columns(c) => transposition::encrypt(text, *c),
        CipherKey::Playfair(k) => playfair::encrypt(text, k),
    }
}

pub fn decrypt(text: &str, key: &CipherKey) -> CfResult<String> {
    match key {
        CipherKey::Shift(s) => Ok(caesar::decrypt(text, *s)),
        CipherKey::Affine { a, b } => affine::decrypt(text, *a, *b),
        CipherKey::Keyword(k) => vigenere::decrypt(text, k),
        CipherKey::Columns(c) => transposition::decrypt(text, *c),
        CipherKey::Playfair(k) => playfair::decrypt(text, k),
    }
}

/// Maps an ASCII letter through `f` on its 0..26 index, keeping its case.
/// Anything else passes through untouched.
#[inline(always)]
pub(crate) fn map_letter<F: Fn(i64) -> i64>(c: char, f: F) -> char {
    let base = if c.is_ascii_uppercase() {
        b'A'
    } else if c.is_ascii_lowercase() {
        b'a'
    } else {
        return c;
    };
    let x = (c as u8 - base) as i64;
    let y = f(x).rem_euclid(ALPHABET_SIZE as i64) as u8;
    (base + y) as char
}
