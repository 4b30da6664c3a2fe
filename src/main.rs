//! orbital - ring signature and stealth address tooling

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;

use orbital::encoding::{parse_biguint, parse_hex_bytes};
use orbital::keygen::generate_keys_with;
use orbital::{Config, CurvePoint, InputData, PrivateKeys, Ring, RingSignature, RingSigner, StealthSession};

#[derive(Parser)]
#[command(name = "orbital")]
#[command(version = "0.1.0")]
#[command(about = "Linkable ring signatures and stealth addresses over BN254")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate n key pairs into a private and a public key file
    Genkeys {
        n: usize,
        privkeys: PathBuf,
        pubkeys: PathBuf,
    },

    /// Sign a message with every private key against the public ring
    Create {
        privkeys: PathBuf,
        pubkeys: PathBuf,
        output: PathBuf,
        /// 0x-prefixed hex message
        message: String,
    },

    /// Verify a list of signatures against the public ring
    Verify {
        pubkeys: PathBuf,
        signatures: PathBuf,
        /// 0x-prefixed hex message
        message: String,
    },

    /// Print a fresh ring and its signatures over a message as contract input
    Geninputs {
        n: usize,
        /// 0x-prefixed hex message
        message: String,
    },

    /// Derive a stealth session against another party's public key
    Stealth {
        /// Our secret key (decimal or 0x hex)
        #[arg(long)]
        secret: String,

        /// Their public key, x coordinate
        #[arg(long)]
        their_x: String,

        /// Their public key, y coordinate
        #[arg(long)]
        their_y: String,

        #[arg(long, default_value_t = 0)]
        offset: u64,

        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {:?}", path))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))
}

fn parse_message(raw: &str) -> Result<Vec<u8>> {
    if !raw.starts_with("0x") {
        bail!("message must be 0x-prefixed hex");
    }
    Ok(parse_hex_bytes(raw)?)
}

fn genkeys(cfg: &Config, n: usize, privkeys: &Path, pubkeys: &Path) -> Result<()> {
    let (pks, sks) = generate_keys_with(&mut rand::rngs::OsRng, n, cfg.key_bound)?;
    write_json(privkeys, &PrivateKeys { privkeys: sks })?;
    write_json(pubkeys, &Ring::new(pks)?)?;
    log::info!("generated {} key pairs", n);
    Ok(())
}

fn create(cfg: &Config, privkeys: &Path, pubkeys: &Path, output: &Path, message: &str) -> Result<()> {
    let keys: PrivateKeys = read_json(privkeys)?;
    let ring: Ring = read_json(pubkeys)?;
    let message = parse_message(message)?;

    let signer = RingSigner::new(cfg.message_digest);
    let signatures = signer.sign_all(&ring, &keys.privkeys, &message)?;
    for (i, sig) in signatures.iter().enumerate() {
        if !signer.verify(&ring, &message, sig) {
            bail!("signature {} failed to verify", i);
        }
    }
    write_json(output, &signatures)
}

fn verify(cfg: &Config, pubkeys: &Path, signatures: &Path, message: &str) -> Result<bool> {
    let ring: Ring = read_json(pubkeys)?;
    let signatures: Vec<RingSignature> = read_json(signatures)?;
    let message = parse_message(message)?;

    let signer = RingSigner::new(cfg.message_digest);
    let mut all_ok = true;
    for (i, sig) in signatures.iter().enumerate() {
        let ok = signer.verify(&ring, &message, sig);
        println!("signature {}: {}", i, if ok { "valid" } else { "INVALID" });
        all_ok &= ok;
    }
    Ok(all_ok)
}

fn geninputs(cfg: &Config, n: usize, message: &str) -> Result<()> {
    let message = parse_message(message)?;
    let (ring, sks) = Ring::generate_with(&mut rand::rngs::OsRng, n, cfg.key_bound)?;
    let signatures = RingSigner::new(cfg.message_digest).sign_all(&ring, &sks, &message)?;
    let data = InputData {
        pubkeys: ring.pubkeys().to_vec(),
        signatures,
    };
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn stealth(secret: &str, their_x: &str, their_y: &str, offset: u64, count: usize) -> Result<()> {
    let secret = parse_biguint(secret)?;
    let their_public = CurvePoint::from_xy(&parse_biguint(their_x)?, &parse_biguint(their_y)?)?;
    let session = StealthSession::derive(&secret, &their_public, offset, count)?;
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

fn run(cli: Cli) -> Result<bool> {
    let cfg = Config::from_env()?;
    log::debug!("configuration: {:?}", cfg);

    match cli.command {
        Commands::Genkeys { n, privkeys, pubkeys } => genkeys(&cfg, n, &privkeys, &pubkeys)?,
        Commands::Create { privkeys, pubkeys, output, message } => {
            create(&cfg, &privkeys, &pubkeys, &output, &message)?
        }
        Commands::Verify { pubkeys, signatures, message } => {
            return verify(&cfg, &pubkeys, &signatures, &message);
        }
        Commands::Geninputs { n, message } => geninputs(&cfg, n, &message)?,
        Commands::Stealth { secret, their_x, their_y, offset, count } => {
            stealth(&secret, &their_x, &their_y, offset, count)?
        }
    }
    Ok(true)
}

fn error_message(e: &anyhow::Error) -> String {
    format!("error: {:#}", e)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}
