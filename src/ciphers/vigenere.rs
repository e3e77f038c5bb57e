use super::map_letter;
use crate::error::{CfResult, CipherForgeError};

pub fn check_key(key: &str) -> CfResult<()> {
    if key.is_empty() {
        return Err(CipherForgeError::InvalidKey("vigenere key is empty".into()));
    }
    if !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CipherForgeError::InvalidKey(format!(
            "vigenere key '{}' must contain only letters",
            key
        )));
    }
    Ok(())
}

fn key_shifts(key: &str) -> CfResult<Vec<i64>> {
    check_key(key)?;
    Ok(key
        .bytes()
        .map(|b| (b.to_ascii_uppercase() - b'A') as i64)
        .collect())
}

// The key position only advances on letters.
fn apply(text: &str, shifts: &[i64], sign: i64) -> String {
    let mut idx = 0;
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let s = shifts[idx % shifts.len()];
                idx += 1;
                map_letter(c, |x| x + sign * s)
            } else {
                c
            }
        })
        .collect()
}

pub fn encrypt(text: &str, key: &str) -> CfResult<String> {
    Ok(apply(text, &key_shifts(key)?, 1))
}

pub fn decrypt(text: &str, key: &str) -> CfResult<String> {
    Ok(apply(text, &key_shifts(key)?, -1))
}
