use cipherforge::ciphers::{self, CipherFamily, CipherKey};
use cipherforge::error::CfResult;
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    #[arg(value_enum)]
    pub family: CipherFamily,

    pub text: String,

    /// Random key when omitted. Affine keys are written `a,b`.
    #[arg(long)]
    pub key: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct DecryptArgs {
    #[arg(value_enum)]
    pub family: CipherFamily,

    pub text: String,

    #[arg(long)]
    pub key: String,
}

pub fn encrypt(args: &EncryptArgs) -> CfResult<()> {
    let key = match &args.key {
        Some(raw) => CipherKey::parse(args.family, raw)?,
        None => {
            let mut rng = match args.seed {
                Some(s) => fastrand::Rng::with_seed(s),
                None => fastrand::Rng::new(),
            };
            let key = CipherKey::random(args.family, &mut rng);
            info!("🎲 Generated random {} key", args.family);
            key
        }
    };
    let ciphertext = ciphers::encrypt(&args.text, &key)?;
    println!("Key: {}", key);
    println!("Ciphertext: {}", ciphertext);
    Ok(())
}

pub fn decrypt(args: &DecryptArgs) -> CfResult<()> {
    let key = CipherKey::parse(args.family, &args.key)?;
    let plaintext = ciphers::decrypt(&args.text, &key)?;
    println!("Plaintext: {}", plaintext);
    Ok(())
}
