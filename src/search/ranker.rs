use crate::scorer::Candidate;
use std::cmp::Ordering;

/// Score descending, then keyspace order ascending. Total, so any two
/// candidates with distinct ordinals have a fixed relative order.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Sorts and keeps the first `top_n`. `top_n` past the end keeps everything.
pub fn rank(mut candidates: Vec<Candidate>, top_n: usize) -> Vec<Candidate> {
    candidates.sort_by(compare);
    candidates.truncate(top_n);
    candidates
}

/// Folds a new batch into an already ranked list.
pub fn merge(ranked: Vec<Candidate>, batch: Vec<Candidate>, top_n: usize) -> Vec<Candidate> {
    let mut all = ranked;
    all.extend(batch);
    rank(all, top_n)
}
