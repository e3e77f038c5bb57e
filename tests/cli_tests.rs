use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    dict_path: PathBuf,
    weights_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dict_path = dir.path().join("words.txt");
        let weights_path = dir.path().join("weights.json");

        let mut dict_file = File::create(&dict_path).unwrap();
        writeln!(dict_file, "hello world").unwrap();
        writeln!(dict_file, "attack dawn").unwrap();

        let mut weights_file = File::create(&weights_path).unwrap();
        writeln!(weights_file, r#"{{ "weight_dictionary_match": 10.0 }}"#).unwrap();

        Self {
            _dir: dir,
            dict_path,
            weights_path,
        }
    }

    fn dict(&self) -> &str {
        self.dict_path.to_str().unwrap()
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cipherforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

// --- ENCRYPT / DECRYPT ---

#[test]
fn test_encrypt_with_explicit_key() {
    let out = run(&["encrypt", "caesar", "HELLO WORLD", "--key", "3"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Key: 3"), "{}", text);
    assert!(text.contains("Ciphertext: KHOOR ZRUOG"), "{}", text);
}

#[test]
fn test_decrypt_affine() {
    let out = run(&["decrypt", "affine", "IHHWVC SWFRCP", "--key", "5,8"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Plaintext: AFFINE CIPHER"));
}

#[test]
fn test_decrypt_rejects_invalid_key() {
    let out = run(&["decrypt", "affine", "abc", "--key", "2,3"]);
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Invalid Key"), "{}", err);
}

#[test]
fn test_seeded_random_key_is_reproducible() {
    let key_re = Regex::new(r"Key: (\S+)").unwrap();
    let first = stdout(&run(&["encrypt", "vigenere", "attack at dawn", "-S", "7"]));
    let second = stdout(&run(&["encrypt", "vigenere", "attack at dawn", "-S", "7"]));

    let k1 = key_re.captures(&first).expect("no key printed")[1].to_string();
    let k2 = key_re.captures(&second).expect("no key printed")[1].to_string();
    assert_eq!(k1, k2);
    assert_eq!(first, second);
}

#[test]
fn test_encrypt_then_decrypt_through_binary() {
    let ct_re = Regex::new(r"Ciphertext: (.+)").unwrap();
    let enc = stdout(&run(&["encrypt", "transposition", "meet me at noon", "--key", "4"]));
    let ct = ct_re.captures(&enc).unwrap()[1].to_string();

    let dec = stdout(&run(&["decrypt", "transposition", &ct, "--key", "4"]));
    assert!(dec.contains("Plaintext: meet me at noon"), "{}", dec);
}

// --- CRACK ---

#[test]
fn test_crack_json_report() {
    let ctx = TestContext::new();
    let out = run(&[
        "crack",
        "caesar",
        "KHOOR ZRUOG",
        "--json",
        "--threads",
        "2",
        "-d",
        ctx.dict(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["evaluated"], 26);
    assert_eq!(report["stopped_early"], false);
    assert_eq!(
        report["ranked"][0]["key"],
        serde_json::json!({"kind": "shift", "value": 3})
    );
    assert_eq!(report["ranked"][0]["plaintext"], "HELLO WORLD");
    assert_eq!(report["ranked"].as_array().unwrap().len(), 5);
}

#[test]
fn test_crack_weights_file_and_cli_override() {
    let ctx = TestContext::new();
    let base = [
        "crack",
        "caesar",
        "KHOOR ZRUOG",
        "--json",
        "--top-n",
        "1",
        "-d",
        ctx.dict(),
        "--weights",
        ctx.weights_path.to_str().unwrap(),
    ];

    // 10 * 2 matches + 1.5 * 5.0
    let out = run(&base);
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["ranked"][0]["score"], 27.5);

    let mut args = base.to_vec();
    args.extend(["--weight-dictionary-match", "1"]);
    let out = run(&args);
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["ranked"][0]["score"], 9.5);
}

#[test]
fn test_crack_table_output() {
    let ctx = TestContext::new();
    let out = run(&["crack", "caesar", "KHOOR ZRUOG", "-d", ctx.dict()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Evaluated 26 keys"), "{}", text);
    assert!(text.contains("HELLO WORLD"));
}

#[test]
fn test_crack_rejects_empty_ciphertext() {
    let out = run(&["crack", "caesar", ""]);
    assert!(!out.status.success());
}

#[test]
fn test_crack_rejects_invalid_config() {
    let out = run(&["crack", "vigenere", "abc", "--max-key-length", "9"]);
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("max_key_length"), "{}", err);
}

#[test]
fn test_missing_dictionary_file_fails() {
    let out = run(&["crack", "caesar", "abc", "-d", "/no/such/words.txt"]);
    assert!(!out.status.success());
}

// --- ANALYZE ---

#[test]
fn test_analyze_json() {
    let out = run(&["analyze", "Attack at dawn! Attack at dusk.", "--json"]);
    assert!(out.status.success());
    let analysis: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(analysis["letter_count"], 24);
    assert_eq!(analysis["frequencies"][0]["letter"], "A");
    assert!(analysis["entropy"]["shannon"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_analyze_table_output() {
    let out = run(&["analyze", "the quick brown fox jumps over the lazy dog"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("TEXT ANALYSIS (35 letters)"), "{}", text);
    assert!(text.contains("Index of coincidence"));
}

#[test]
fn test_analyze_with_repeated_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spanish.csv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "e,12\na,11\no,8\nde,0.06\nla,0.04\nque,0.03").unwrap();

    let out = run(&[
        "analyze",
        "el gato de la casa que",
        "--json",
        "-p",
        path.to_str().unwrap(),
        "-p",
        path.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let analysis: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let languages = analysis["languages"].as_array().unwrap();
    // The same file twice is one language; English is always a candidate.
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[0][0], "spanish");
    assert_eq!(languages[1][0], "english");
}
