use cipherforge::ciphers::{
    self, affine, caesar, playfair, transposition, vigenere, CipherFamily, CipherKey,
};
use cipherforge::error::CipherForgeError;
use proptest::prelude::*;
use rstest::rstest;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn test_caesar_known_vector() {
    assert_eq!(caesar::encrypt("Hello, World!", 3), "Khoor, Zruog!");
    assert_eq!(caesar::decrypt("Khoor, Zruog!", 3), "Hello, World!");
    assert_eq!(caesar::encrypt("xyz", 3), "abc");
}

#[test]
fn test_affine_known_vector() {
    // E(x) = 5x + 8
    assert_eq!(affine::encrypt("AFFINE CIPHER", 5, 8).unwrap(), "IHHWVC SWFRCP");
    assert_eq!(affine::decrypt("IHHWVC SWFRCP", 5, 8).unwrap(), "AFFINE CIPHER");
}

#[rstest]
#[case(2)]
#[case(13)]
#[case(26)]
fn test_affine_rejects_non_invertible_multiplier(#[case] a: u8) {
    match affine::decrypt("abc", a, 1) {
        Err(CipherForgeError::InvalidKey(_)) => {}
        other => panic!("expected InvalidKey, got {:?}", other),
    }
}

#[test]
fn test_affine_units() {
    assert_eq!(
        affine::multiplicative_units(),
        vec![1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25]
    );
    assert_eq!(affine::mod_inverse(5, 26), Some(21));
    assert_eq!(affine::mod_inverse(13, 26), None);
    assert_eq!(affine::gcd(12, 26), 2);
}

#[test]
fn test_vigenere_skips_non_letters_in_key_position() {
    // The space does not consume a key letter.
    assert_eq!(vigenere::encrypt("ab ab", "BC").unwrap(), "bd bd");
}

#[test]
fn test_transposition_keeps_every_character() {
    let ct = transposition::encrypt("we are discovered", 4).unwrap();
    assert_eq!(ct.chars().count(), "we are discovered".chars().count());
    assert_eq!(
        transposition::decrypt(&ct, 4).unwrap(),
        "we are discovered"
    );
}

#[test]
fn test_playfair_drops_non_letters_and_pads() {
    let prepared: String = playfair::prepare_digraphs("Hello!")
        .into_iter()
        .flat_map(|(a, b)| [a as char, b as char])
        .collect();
    assert_eq!(prepared, "helxlo");

    let ct = playfair::encrypt("Hello!", "monarchy").unwrap();
    assert_eq!(ct.len(), 6);
    assert_eq!(playfair::decrypt(&ct, "monarchy").unwrap(), "helxlo");
}

// --- KEYS ---

#[rstest]
#[case(CipherFamily::Caesar, "3", CipherKey::Shift(3))]
#[case(CipherFamily::Caesar, "-1", CipherKey::Shift(25))]
#[case(CipherFamily::Caesar, "29", CipherKey::Shift(3))]
#[case(CipherFamily::Affine, "5,8", CipherKey::Affine { a: 5, b: 8 })]
#[case(CipherFamily::Affine, " 31 , 30 ", CipherKey::Affine { a: 5, b: 4 })]
#[case(CipherFamily::Vigenere, "lemon", CipherKey::Keyword("LEMON".into()))]
#[case(CipherFamily::Transposition, "6", CipherKey::Columns(6))]
#[case(CipherFamily::Playfair, "monarchy", CipherKey::Playfair("monarchy".into()))]
fn test_parse_key(#[case] family: CipherFamily, #[case] raw: &str, #[case] expected: CipherKey) {
    let key = CipherKey::parse(family, raw).unwrap();
    assert_eq!(key, expected);
    assert_eq!(key.family(), family);
}

#[rstest]
#[case(CipherFamily::Caesar, "three")]
#[case(CipherFamily::Affine, "5")]
#[case(CipherFamily::Affine, "2,3")]
#[case(CipherFamily::Vigenere, "k3y")]
#[case(CipherFamily::Vigenere, "")]
#[case(CipherFamily::Transposition, "0")]
#[case(CipherFamily::Transposition, "-2")]
#[case(CipherFamily::Playfair, "1234")]
fn test_parse_key_rejects(#[case] family: CipherFamily, #[case] raw: &str) {
    assert!(matches!(
        CipherKey::parse(family, raw),
        Err(CipherForgeError::InvalidKey(_))
    ));
}

#[test]
fn test_key_display_parses_back() {
    let keys = [
        CipherKey::Shift(7),
        CipherKey::Affine { a: 7, b: 3 },
        CipherKey::Keyword("KEY".into()),
        CipherKey::Columns(4),
        CipherKey::Playfair("secret".into()),
    ];
    for key in keys {
        assert_eq!(CipherKey::parse(key.family(), &key.to_string()).unwrap(), key);
    }
}

#[test]
fn test_key_json_shape() {
    let json = serde_json::to_value(CipherKey::Shift(3)).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "shift", "value": 3}));

    let json = serde_json::to_value(CipherKey::Affine { a: 5, b: 8 }).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"kind": "affine", "value": {"a": 5, "b": 8}})
    );

    let back: CipherKey =
        serde_json::from_str(r#"{"kind":"keyword","value":"LEMON"}"#).unwrap();
    assert_eq!(back, CipherKey::Keyword("LEMON".into()));
}

#[test]
fn test_family_names() {
    assert_eq!(CipherFamily::from_str("vigenere").unwrap(), CipherFamily::Vigenere);
    assert_eq!(CipherFamily::Transposition.to_string(), "transposition");
    assert_eq!(CipherFamily::iter().count(), 5);
}

#[test]
fn test_random_keys_are_valid_and_seeded() {
    for family in CipherFamily::iter() {
        let mut a = fastrand::Rng::with_seed(42);
        let mut b = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let key = CipherKey::random(family, &mut a);
            assert_eq!(key.family(), family);
            assert!(key.validate().is_ok(), "{:?}", key);
            assert_eq!(key, CipherKey::random(family, &mut b));
        }
    }
}

#[test]
fn test_dispatch_matches_family_functions() {
    let text = "Attack at dawn";
    assert_eq!(
        ciphers::encrypt(text, &CipherKey::Keyword("LEMON".into())).unwrap(),
        vigenere::encrypt(text, "LEMON").unwrap()
    );
    assert!(ciphers::decrypt(text, &CipherKey::Affine { a: 4, b: 0 }).is_err());
}

// --- PROPERTIES ---

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_caesar_round_trip(text in "[ -~]{0,60}", shift in 0u8..26) {
        prop_assert_eq!(caesar::decrypt(&caesar::encrypt(&text, shift), shift), text);
    }

    #[test]
    fn prop_affine_round_trip(
        text in "[ -~]{0,60}",
        unit in 0usize..12,
        b in 0u8..26,
    ) {
        let a = affine::multiplicative_units()[unit];
        let ct = affine::encrypt(&text, a, b).unwrap();
        prop_assert_eq!(affine::decrypt(&ct, a, b).unwrap(), text);
    }

    #[test]
    fn prop_vigenere_round_trip(text in "[ -~]{0,60}", key in "[A-Za-z]{1,8}") {
        let ct = vigenere::encrypt(&text, &key).unwrap();
        prop_assert_eq!(vigenere::decrypt(&ct, &key).unwrap(), text);
    }

    #[test]
    fn prop_transposition_round_trip(text in "[ -~]{0,60}", columns in 1usize..70) {
        let ct = transposition::encrypt(&text, columns).unwrap();
        prop_assert_eq!(transposition::decrypt(&ct, columns).unwrap(), text);
    }

    #[test]
    fn prop_playfair_recovers_prepared_text(text in "[a-zA-Z ]{0,40}", key in "[a-z]{1,10}") {
        let ct = playfair::encrypt(&text, &key).unwrap();
        let prepared: String = playfair::prepare_digraphs(&text)
            .into_iter()
            .flat_map(|(a, b)| [a as char, b as char])
            .collect();
        prop_assert_eq!(playfair::decrypt(&ct, &key).unwrap(), prepared);
    }
}
