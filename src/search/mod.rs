pub mod ranker;
pub mod runner;

pub use self::ranker::rank;
pub use self::runner::{Cracker, NoProgress, ProgressCallback, SearchOptions, SearchReport};
