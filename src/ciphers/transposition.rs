use crate::error::{CfResult, CipherForgeError};

pub fn check_key(columns: usize) -> CfResult<()> {
    if columns == 0 {
        return Err(CipherForgeError::InvalidKey(
            "transposition needs at least one column".into(),
        ));
    }
    Ok(())
}

/// Length of column `col` when `len` characters are laid out row-wise in
/// `columns` columns (the last row may be short).
#[inline(always)]
fn column_len(len: usize, columns: usize, col: usize) -> usize {
    (len + columns - 1 - col) / columns
}

/// Writes the text row by row into `columns` columns and reads it back
/// column by column. Every character, spaces included, is transposed.
pub fn encrypt(text: &str, columns: usize) -> CfResult<String> {
    check_key(columns)?;
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for col in 0..columns {
        for i in (col..chars.len()).step_by(columns) {
            out.push(chars[i]);
        }
    }
    Ok(out)
}

pub fn decrypt(text: &str, columns: usize) -> CfResult<String> {
    check_key(columns)?;
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    // Column start offsets inside the ciphertext.
    let mut starts = Vec::with_capacity(columns);
    let mut offset = 0;
    for col in 0..columns {
        starts.push(offset);
        offset += column_len(len, columns, col);
    }

    let mut out = String::with_capacity(text.len());
    for i in 0..len {
        let (row, col) = (i / columns, i % columns);
        out.push(chars[starts[col] + row]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_columns() {
        // c o m m o n
        // s e n s e
        assert_eq!(encrypt("commonsense", 6).unwrap(), "csoemnmsoen");
        assert_eq!(decrypt("csoemnmsoen", 6).unwrap(), "commonsense");
    }

    #[test]
    fn short_last_row_round_trips() {
        let text = "Common sense is not so common.";
        for k in 1..=text.len() + 2 {
            let ct = encrypt(text, k).unwrap();
            assert_eq!(decrypt(&ct, k).unwrap(), text, "columns={}", k);
        }
    }

    #[test]
    fn zero_columns_is_invalid() {
        assert!(encrypt("abc", 0).is_err());
        assert!(decrypt("abc", 0).is_err());
    }
}
