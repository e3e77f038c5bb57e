use crate::error::{CfResult, CipherForgeError};

/// A 5x5 Playfair square. I and J share a cell.
struct KeySquare {
    grid: [[u8; 5]; 5],
    pos: [(usize, usize); 26],
}

#[inline(always)]
fn fold_letter(c: char) -> Option<u8> {
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let b = c.to_ascii_lowercase() as u8;
    Some(if b == b'j' { b'i' } else { b })
}

pub fn check_key(key: &str) -> CfResult<()> {
    if !key.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(CipherForgeError::InvalidKey(format!(
            "playfair keyword '{}' contains no letters",
            key
        )));
    }
    Ok(())
}

impl KeySquare {
    fn new(key: &str) -> CfResult<Self> {
        check_key(key)?;
        let mut used = [false; 26];
        used[(b'j' - b'a') as usize] = true;

        let mut order = Vec::with_capacity(25);
        let alphabet = ('a'..='z').filter_map(fold_letter);
        for b in key.chars().filter_map(fold_letter).chain(alphabet) {
            let idx = (b - b'a') as usize;
            if !used[idx] {
                used[idx] = true;
                order.push(b);
            }
        }

        let mut grid = [[0u8; 5]; 5];
        let mut pos = [(0usize, 0usize); 26];
        for (k, &b) in order.iter().enumerate() {
            grid[k / 5][k % 5] = b;
            pos[(b - b'a') as usize] = (k / 5, k % 5);
        }
        // J reads as I.
        pos[(b'j' - b'a') as usize] = pos[(b'i' - b'a') as usize];

        Ok(Self { grid, pos })
    }

    #[inline(always)]
    fn locate(&self, b: u8) -> (usize, usize) {
        self.pos[(b - b'a') as usize]
    }

    /// `step` is 1 for encryption and 4 (i.e. -1 mod 5) for decryption.
    fn transform_pair(&self, a: u8, b: u8, step: usize, out: &mut String) {
        let (r1, c1) = self.locate(a);
        let (r2, c2) = self.locate(b);
        let (x, y) = if r1 == r2 {
            (self.grid[r1][(c1 + step) % 5], self.grid[r2][(c2 + step) % 5])
        } else if c1 == c2 {
            (self.grid[(r1 + step) % 5][c1], self.grid[(r2 + step) % 5][c2])
        } else {
            (self.grid[r1][c2], self.grid[r2][c1])
        };
        out.push(x as char);
        out.push(y as char);
    }
}

/// Splits text into Playfair digraphs: letters only, lowercase, J folded into
/// I, a filler between doubled letters and after an odd trailing letter.
pub fn prepare_digraphs(text: &str) -> Vec<(u8, u8)> {
    let letters: Vec<u8> = text.chars().filter_map(fold_letter).collect();
    let filler = |a: u8| if a == b'x' { b'q' } else { b'x' };

    let mut pairs = Vec::with_capacity(letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        let a = letters[i];
        match letters.get(i + 1) {
            Some(&b) if b != a => {
                pairs.push((a, b));
                i += 2;
            }
            _ => {
                pairs.push((a, filler(a)));
                i += 1;
            }
        }
    }
    pairs
}

pub fn encrypt(text: &str, key: &str) -> CfResult<String> {
    let square = KeySquare::new(key)?;
    let mut out = String::with_capacity(text.len() + 2);
    for (a, b) in prepare_digraphs(text) {
        square.transform_pair(a, b, 1, &mut out);
    }
    Ok(out)
}

pub fn decrypt(text: &str, key: &str) -> CfResult<String> {
    let square = KeySquare::new(key)?;
    let mut letters: Vec<u8> = text.chars().filter_map(fold_letter).collect();
    if letters.len() % 2 == 1 {
        letters.push(b'x');
    }
    let mut out = String::with_capacity(letters.len());
    for pair in letters.chunks_exact(2) {
        square.transform_pair(pair[0], pair[1], 4, &mut out);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wikipedia_vector() {
        let ct = encrypt("hide the gold in the tree stump", "playfair example").unwrap();
        assert_eq!(ct, "bmodzbxdnabekudmuixmmouvif");
        assert_eq!(
            decrypt(&ct, "playfair example").unwrap(),
            "hidethegoldinthetrexestump"
        );
    }

    #[test]
    fn doubled_letters_get_a_filler() {
        let pairs = prepare_digraphs("balloon");
        assert_eq!(
            pairs,
            vec![(b'b', b'a'), (b'l', b'x'), (b'l', b'o'), (b'o', b'n')]
        );
    }

    #[test]
    fn keyword_without_letters_is_invalid() {
        assert!(encrypt("abc", "123").is_err());
    }
}
