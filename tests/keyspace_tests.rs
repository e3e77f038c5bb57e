use cipherforge::ciphers::{CipherFamily, CipherKey};
use cipherforge::config::SearchParams;
use cipherforge::consts::AFFINE_UNIT_COUNT;
use cipherforge::dictionary::Dictionary;
use cipherforge::keyspace::{increment_key, KeySpace};
use cipherforge::patterns::KasiskiResult;
use rstest::rstest;
use std::collections::HashSet;

#[test]
fn test_caesar_keyspace_is_0_to_25() {
    let keys: Vec<CipherKey> = KeySpace::Caesar.iter().collect();
    assert_eq!(keys.len(), 26);
    assert_eq!(keys[0], CipherKey::Shift(0));
    assert_eq!(keys[25], CipherKey::Shift(25));
    assert_eq!(KeySpace::Caesar.cardinality(), 26);
}

#[test]
fn test_affine_keyspace_has_312_invertible_keys() {
    let keys: Vec<CipherKey> = KeySpace::Affine.iter().collect();
    assert_eq!(keys.len(), 312);
    assert_eq!(KeySpace::Affine.cardinality(), 312);
    assert_eq!(
        cipherforge::ciphers::affine::multiplicative_units().len(),
        AFFINE_UNIT_COUNT
    );

    let multipliers: HashSet<u8> = keys
        .iter()
        .map(|k| match k {
            CipherKey::Affine { a, .. } => *a,
            other => panic!("unexpected key {:?}", other),
        })
        .collect();
    let expected: HashSet<u8> = [1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25].into();
    assert_eq!(multipliers, expected);

    for k in &keys {
        assert!(k.validate().is_ok(), "{:?} should be valid", k);
    }
    assert_eq!(keys[0], CipherKey::Affine { a: 1, b: 0 });
    assert_eq!(keys[26], CipherKey::Affine { a: 3, b: 0 });
}

#[test]
fn test_vigenere_odometer_order() {
    let space = KeySpace::vigenere(2);
    let keys: Vec<String> = space
        .iter()
        .map(|k| match k {
            CipherKey::Keyword(s) => s,
            other => panic!("unexpected key {:?}", other),
        })
        .collect();

    assert_eq!(keys.len(), 26 + 26 * 26);
    assert_eq!(keys[0], "A");
    assert_eq!(keys[25], "Z");
    assert_eq!(keys[26], "AA");
    assert_eq!(keys[27], "AB");
    assert_eq!(keys[26 + 26], "BA");
    assert_eq!(keys.last().unwrap(), "ZZ");

    // Lexicographic within each length.
    for w in keys[26..].windows(2) {
        assert!(w[0] < w[1]);
    }
}

#[test]
fn test_increment_key_wraps() {
    let mut key = *b"AZZ";
    assert!(increment_key(&mut key));
    assert_eq!(&key, b"BAA");

    let mut key = *b"Z";
    assert!(!increment_key(&mut key));
}

#[rstest]
#[case(1, 26)]
#[case(3, 26 + 676 + 17_576)]
#[case(8, 217_180_147_158)]
fn test_vigenere_cardinality(#[case] max_len: usize, #[case] expected: u64) {
    assert_eq!(KeySpace::vigenere(max_len).cardinality(), expected);
}

#[test]
fn test_cardinality_saturates() {
    let huge = KeySpace::Vigenere {
        lengths: vec![20, 20],
    };
    assert_eq!(huge.cardinality(), u64::MAX);
}

#[test]
fn test_keyspace_is_restartable() {
    let space = KeySpace::vigenere(2);
    let first: Vec<CipherKey> = space.iter().take(40).collect();
    let second: Vec<CipherKey> = space.iter().take(40).collect();
    assert_eq!(first, second);
}

#[test]
fn test_hint_puts_ranked_lengths_first_without_dropping() {
    let mut hint = KasiskiResult::default();
    hint.factor_frequencies.insert(2, 3);
    hint.factor_frequencies.insert(3, 9);
    hint.factor_frequencies.insert(9, 1);
    hint.key_lengths = vec![2, 3, 9];

    let space = KeySpace::vigenere_with_hint(4, &hint);
    assert_eq!(
        space,
        KeySpace::Vigenere {
            lengths: vec![3, 2, 1, 4]
        }
    );
    assert_eq!(space.cardinality(), KeySpace::vigenere(4).cardinality());

    let first = space.iter().next().unwrap();
    assert_eq!(first, CipherKey::Keyword("AAA".into()));
}

#[test]
fn test_transposition_keyspace() {
    let space = KeySpace::Transposition { max_columns: 5 };
    let keys: Vec<CipherKey> = space.iter().collect();
    assert_eq!(
        keys,
        vec![
            CipherKey::Columns(2),
            CipherKey::Columns(3),
            CipherKey::Columns(4),
            CipherKey::Columns(5)
        ]
    );
    assert_eq!(space.cardinality(), 4);
    assert_eq!(KeySpace::Transposition { max_columns: 1 }.iter().count(), 0);
    assert_eq!(KeySpace::Transposition { max_columns: 0 }.cardinality(), 0);
}

#[test]
fn test_for_family() {
    let params = SearchParams::default();
    let dict = Dictionary::from_words(["zebra", "alpha"]);

    let t = KeySpace::for_family(CipherFamily::Transposition, &params, "abc def", &dict, None)
        .unwrap();
    assert_eq!(t, KeySpace::Transposition { max_columns: 7 });

    let p = KeySpace::for_family(CipherFamily::Playfair, &params, "abc", &dict, None).unwrap();
    assert_eq!(
        p,
        KeySpace::Playfair {
            keywords: vec!["alpha".into(), "zebra".into()]
        }
    );

    let v = KeySpace::for_family(CipherFamily::Vigenere, &params, "abc", &dict, None).unwrap();
    assert_eq!(v, KeySpace::vigenere(params.max_key_length));

    // An empty hint falls back to plain ascending lengths.
    let empty = KasiskiResult::default();
    let v = KeySpace::for_family(CipherFamily::Vigenere, &params, "abc", &dict, Some(&empty))
        .unwrap();
    assert_eq!(v, KeySpace::vigenere(params.max_key_length));
}

#[rstest]
#[case(0)]
#[case(9)]
fn test_for_family_rejects_bad_vigenere_bound(#[case] max_key_length: usize) {
    let params = SearchParams {
        max_key_length,
        ..SearchParams::default()
    };
    let dict = Dictionary::new();
    assert!(KeySpace::for_family(CipherFamily::Vigenere, &params, "abc", &dict, None).is_err());
}

#[test]
fn test_explicit_keyspace_keeps_order() {
    let keys = vec![
        CipherKey::Shift(9),
        CipherKey::Affine { a: 2, b: 1 },
        CipherKey::Shift(1),
    ];
    let space = KeySpace::Explicit(keys.clone());
    assert_eq!(space.iter().collect::<Vec<_>>(), keys);
    assert_eq!(space.cardinality(), 3);
}
