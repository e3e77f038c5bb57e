use super::ranker;
use crate::config::Config;
use crate::dictionary::WordSource;
use crate::error::{CfResult, CipherForgeError};
use crate::keyspace::KeySpace;
use crate::scorer::{Candidate, CandidateFailure, Evaluator};
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct SearchOptions {
    pub num_threads: usize,
    pub batch_size: usize,
    pub max_keys: Option<usize>,
    pub max_time: Option<Duration>,
    pub top_n: usize,
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            num_threads: if cfg.search.threads == 0 {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            } else {
                cfg.search.threads
            },
            batch_size: cfg.search.batch_size.max(1),
            max_keys: cfg.search.max_keys,
            max_time: cfg.search.time_limit_secs.map(Duration::from_secs),
            top_n: cfg.search.top_n,
        }
    }
}

/// Receives updates between batches.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, evaluated: usize, best: Option<&Candidate>) -> bool;
}

impl<T: ProgressCallback + ?Sized> ProgressCallback for &T {
    fn on_progress(&self, evaluated: usize, best: Option<&Candidate>) -> bool {
        (**self).on_progress(evaluated, best)
    }
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _evaluated: usize, _best: Option<&Candidate>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// Best first, at most `top_n`.
    pub ranked: Vec<Candidate>,
    /// Keys taken from the keyspace, failures included.
    pub evaluated: usize,
    pub failures: Vec<CandidateFailure>,
    /// True when a budget or the callback cut enumeration short.
    pub stopped_early: bool,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn best(&self) -> Option<&Candidate> {
        self.ranked.first()
    }
}

pub struct Cracker<W: WordSource + ?Sized> {
    evaluator: Evaluator<W>,
    options: SearchOptions,
}

impl<W: WordSource + ?Sized> Cracker<W> {
    pub fn new(evaluator: Evaluator<W>, options: SearchOptions) -> Self {
        Self { evaluator, options }
    }

    /// Pulls keys in batches, evaluates each batch in parallel and folds it
    /// into the running top-N. Whatever has been ranked when a budget runs
    /// out is returned as a valid partial result.
    pub fn run<CB: ProgressCallback>(
        &self,
        keyspace: &KeySpace,
        callback: CB,
    ) -> CfResult<SearchReport> {
        let opts = &self.options;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.num_threads)
            .build()
            .map_err(|e| CipherForgeError::Config(format!("thread pool: {}", e)))?;

        info!(
            keys = keyspace.cardinality(),
            threads = opts.num_threads,
            "Starting search"
        );

        let start_time = Instant::now();
        let limit = opts.max_keys.unwrap_or(usize::MAX);
        let mut keys = keyspace.iter().enumerate().take(limit).peekable();

        let mut ranked: Vec<Candidate> = Vec::new();
        let mut failures = Vec::new();
        let mut evaluated = 0;
        let mut stopped_early = false;

        loop {
            if keys.peek().is_none() {
                break;
            }
            if let Some(max_time) = opts.max_time {
                if start_time.elapsed() >= max_time {
                    stopped_early = true;
                    break;
                }
            }

            let batch: Vec<_> = keys.by_ref().take(opts.batch_size).collect();
            evaluated += batch.len();

            let results: Vec<Result<Candidate, CandidateFailure>> = pool.install(|| {
                batch
                    .into_par_iter()
                    .map(|(ordinal, key)| self.evaluator.evaluate(ordinal, key))
                    .collect()
            });

            let mut scored = Vec::with_capacity(results.len());
            for r in results {
                match r {
                    Ok(c) => scored.push(c),
                    Err(f) => {
                        debug!(
                            ordinal = f.ordinal,
                            key = %f.key,
                            reason = %f.reason,
                            "Skipped key"
                        );
                        failures.push(f);
                    }
                }
            }
            ranked = ranker::merge(ranked, scored, opts.top_n);
            debug!(evaluated, best = ?ranked.first().map(|c| c.score), "Batch done");

            if !callback.on_progress(evaluated, ranked.first()) {
                // Only early if keys remain.
                stopped_early = keys.peek().is_some();
                break;
            }
        }

        let budget_hit = opts.max_keys.is_some_and(|m| evaluated >= m);
        if budget_hit && keyspace.cardinality() > evaluated as u64 {
            stopped_early = true;
        }

        let elapsed = start_time.elapsed();
        info!(
            evaluated,
            failures = failures.len(),
            stopped_early,
            "Search finished in {:.2?}",
            elapsed
        );

        Ok(SearchReport {
            ranked,
            evaluated,
            failures,
            stopped_early,
            elapsed,
        })
    }
}
