use super::map_letter;

pub fn encrypt(text: &str, shift: u8) -> String {
    let s = shift as i64;
    text.chars().map(|c| map_letter(c, |x| x + s)).collect()
}

pub fn decrypt(text: &str, shift: u8) -> String {
    let s = shift as i64;
    text.chars().map(|c| map_letter(c, |x| x - s)).collect()
}
