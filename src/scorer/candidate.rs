use super::FeatureSet;
use crate::ciphers::CipherKey;
use serde::Serialize;

/// One scored decryption. Built once per enumerated key and never changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Position of the key in keyspace order; breaks score ties.
    pub ordinal: usize,
    pub key: CipherKey,
    pub plaintext: String,
    pub features: FeatureSet,
    pub score: f64,
}

/// A key that could not be evaluated. Recorded next to the ranking, never
/// fatal to the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateFailure {
    pub ordinal: usize,
    pub key: CipherKey,
    pub reason: String,
}
