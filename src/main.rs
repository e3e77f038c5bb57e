use cipherforge::api::Session;
use cipherforge::config::{Config, ScoringWeights};
use cipherforge::dictionary::{loader, Dictionary};
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::stats::LanguageProfile;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list replacing the built-in dictionary.
    #[arg(global = true, short, long)]
    dictionary: Option<String>,

    /// Single-character word separator inside the dictionary file.
    #[arg(global = true, long, default_value = " ")]
    delimiter: String,

    /// Two-column `symbol,frequency` CSV. Repeatable: the first replaces the
    /// English scoring profile, all of them are candidates for language
    /// detection.
    #[arg(global = true, short, long, action = clap::ArgAction::Append)]
    profile: Vec<String>,

    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Crack(cmd::crack::CrackArgs),
    Analyze(cmd::analyze::AnalyzeArgs),
    Encrypt(cmd::transform::EncryptArgs),
    Decrypt(cmd::transform::DecryptArgs),
}

fn parse_delimiter(raw: &str) -> CfResult<u8> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(CipherForgeError::Config(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        ))),
    }
}

fn build_session(cli: &Cli, mut config: Config, sub_matches: &ArgMatches) -> CfResult<Session> {
    let dictionary = match &cli.dictionary {
        Some(path) => {
            info!("📚 Loading Dictionary: {}", path);
            loader::load_from_file(path, parse_delimiter(&cli.delimiter)?)?
        }
        None => Dictionary::builtin(),
    };
    info!("📚 Dictionary holds {} words", dictionary.len());

    let mut profiles = Vec::with_capacity(cli.profile.len());
    for path in &cli.profile {
        info!("🔤 Loading Language Profile: {}", path);
        profiles.push(LanguageProfile::load_from_file(path)?);
    }
    let mut extra = profiles.into_iter();
    let profile = extra.next().unwrap_or_else(LanguageProfile::english);

    if let Some(path) = &cli.weights {
        info!("⚖️  Loading Weights from: {}", path);
        let mut file_weights = ScoringWeights::load_from_file(path)?;
        file_weights.merge_from_cli(&config.weights, sub_matches);
        config.weights = file_weights;
    } else {
        info!("Using embedded default weights.");
    }

    let mut session = Session::new(dictionary, profile, config)?;
    for p in extra {
        session.add_language_profile(p);
    }
    let english = LanguageProfile::english();
    if !session.languages.iter().any(|p| p.name == english.name) {
        session.add_language_profile(english);
    }
    Ok(session)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    // Config flags live in the subcommand's matches, not the root.
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);

    let result = match &cli.command {
        Commands::Crack(args) => build_session(&cli, args.config.clone(), sub_matches)
            .and_then(|session| cmd::crack::run(args, &session)),
        Commands::Analyze(args) => build_session(&cli, args.config.clone(), sub_matches)
            .and_then(|session| cmd::analyze::run(args, &session)),
        Commands::Encrypt(args) => cmd::transform::encrypt(args),
        Commands::Decrypt(args) => cmd::transform::decrypt(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
