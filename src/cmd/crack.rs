use crate::reports;
use cipherforge::api::Session;
use cipherforge::ciphers::CipherFamily;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::scorer::Candidate;
use cipherforge::search::ProgressCallback;
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[arg(value_enum)]
    pub family: CipherFamily,

    pub ciphertext: String,

    /// Print the full report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub config: Config,
}

/// Logs the running best between batches.
struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, evaluated: usize, best: Option<&Candidate>) -> bool {
        if let Some(c) = best {
            info!(
                "   {:>10} keys | best {:>8.2} | key {}",
                evaluated, c.score, c.key
            );
        }
        true
    }
}

pub fn run(args: &CrackArgs, session: &Session) -> CfResult<()> {
    info!(
        "🔓 Cracking {} ciphertext ({} mode)",
        args.family, session.config.search.mode
    );
    let report = session.crack_with(&args.ciphertext, args.family, LogProgress)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_candidates(&report);
    reports::print_features(&report.ranked);
    if !report.failures.is_empty() {
        reports::print_failures(&report.failures);
    }
    if report.stopped_early {
        info!("⏱️  Search stopped early; ranking covers the keys evaluated so far.");
    }
    Ok(())
}
