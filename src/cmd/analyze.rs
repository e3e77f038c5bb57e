use crate::reports;
use cipherforge::api::Session;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    pub text: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: &AnalyzeArgs, session: &Session) -> CfResult<()> {
    let analysis = session.analyze(&args.text);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        reports::print_analysis(&analysis);
    }
    Ok(())
}
