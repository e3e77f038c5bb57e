use super::map_letter;
use crate::consts::ALPHABET_SIZE;
use crate::error::{CfResult, CipherForgeError};

const M: i64 = ALPHABET_SIZE as i64;

pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a.abs()
}

/// Modular inverse via the extended Euclidean algorithm.
/// Returns `None` when `a` and `m` share a factor.
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    let (mut old_r, mut r) = (a.rem_euclid(m), m);
    let (mut old_s, mut s) = (1i64, 0i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(m))
}

/// The multipliers in 1..26 that are invertible mod 26, ascending.
pub fn multiplicative_units() -> Vec<u8> {
    (1..ALPHABET_SIZE as u8)
        .filter(|&a| gcd(a as i64, M) == 1)
        .collect()
}

fn inverse_or_err(a: u8) -> CfResult<i64> {
    mod_inverse(a as i64, M).ok_or_else(|| {
        CipherForgeError::InvalidKey(format!("affine multiplier {} is not coprime with 26", a))
    })
}

pub fn encrypt(text: &str, a: u8, b: u8) -> CfResult<String> {
    // Encryption with a non-unit would not be reversible either.
    inverse_or_err(a)?;
    let (a, b) = (a as i64, b as i64);
    Ok(text.chars().map(|c| map_letter(c, |x| a * x + b)).collect())
}

pub fn decrypt(text: &str, a: u8, b: u8) -> CfResult<String> {
    let a_inv = inverse_or_err(a)?;
    let b = b as i64;
    Ok(text
        .chars()
        .map(|c| map_letter(c, |y| a_inv * (y - b)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_units_mod_26() {
        assert_eq!(
            multiplicative_units(),
            vec![1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25]
        );
    }

    #[test]
    fn inverse_times_value_is_one() {
        for a in multiplicative_units() {
            let inv = mod_inverse(a as i64, 26).unwrap();
            assert_eq!((a as i64 * inv) % 26, 1);
        }
        assert_eq!(mod_inverse(13, 26), None);
        assert_eq!(mod_inverse(2, 26), None);
    }

    #[test]
    fn known_vector() {
        // E(x) = 5x + 8
        assert_eq!(encrypt("AFFINE cipher", 5, 8).unwrap(), "IHHWVC swfrcp");
        assert_eq!(decrypt("IHHWVC swfrcp", 5, 8).unwrap(), "AFFINE cipher");
    }

    #[test]
    fn rejects_non_invertible_multiplier() {
        assert!(decrypt("abc", 13, 0).is_err());
        assert!(encrypt("abc", 4, 1).is_err());
    }
}
