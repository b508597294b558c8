//! Cipherkit CLI - Command line interface.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zeroize::Zeroizing;

use cipherkit_crypto::{aead, encoding, mac, random, KeySize};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "cipherkit")]
#[command(about = "Cipherkit CLI - Encrypt, sign and generate secrets")]
#[command(version)]
struct Cli {
    /// Log filter directive, e.g. `debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long, global = true, env = "CIPHERKIT_LOG")]
    log_level: Option<String>,

    /// Output format (value, json)
    #[arg(long, global = true, default_value = "value")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random AES-GCM key
    Keygen {
        /// Key size: 16, 24, 32, 128, 192, 256 or aes{128,192,256}-gcm
        #[arg(long, default_value = "aes256-gcm")]
        size: KeySize,
    },
    /// Generate a random salt
    Salt {
        /// Salt length in bytes (must be > 0)
        #[arg(long, default_value_t = 16)]
        len: usize,
    },
    /// Generate random bytes
    Random {
        /// Number of bytes
        #[arg(long)]
        len: usize,
    },
    /// Encrypt data into a base64 ciphertext blob
    Encrypt {
        /// Base64-encoded 16, 24 or 32-byte key
        #[arg(long, env = "CIPHERKIT_KEY", hide_env_values = true)]
        key: String,
        /// Plaintext file (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Associated data to authenticate alongside the plaintext
        #[arg(long)]
        aad: Option<String>,
    },
    /// Decrypt a base64 ciphertext blob
    Decrypt {
        /// Base64-encoded 16, 24 or 32-byte key
        #[arg(long, env = "CIPHERKIT_KEY", hide_env_values = true)]
        key: String,
        /// Ciphertext file (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Associated data supplied at encryption time
        #[arg(long)]
        aad: Option<String>,
        /// Write plaintext to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute an HMAC-SHA256 signature
    Sign {
        /// Base64-encoded MAC key
        #[arg(long, env = "CIPHERKIT_KEY", hide_env_values = true)]
        key: String,
        /// Data file (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Verify an HMAC-SHA256 signature (exit status 1 if invalid)
    Verify {
        /// Base64-encoded MAC key
        #[arg(long, env = "CIPHERKIT_KEY", hide_env_values = true)]
        key: String,
        /// Base64 signature to check
        #[arg(long)]
        signature: String,
        /// Data file (stdin if omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Value,
    Json,
}

fn parse_format(format: &str) -> Result<Format> {
    match format {
        "value" => Ok(Format::Value),
        "json" => Ok(Format::Json),
        _ => bail!("Unknown format: {}. Use 'json' or 'value'", format),
    }
}

// ============================================================================
// Output Types
// ============================================================================

#[derive(Serialize)]
struct KeyOutput {
    algorithm: String,
    size: usize,
    key: String,
}

#[derive(Serialize)]
struct BytesOutput {
    len: usize,
    value: String,
}

#[derive(Serialize)]
struct CiphertextOutput<'a> {
    ciphertext: &'a str,
}

#[derive(Serialize)]
struct PlaintextOutput {
    plaintext_base64: String,
}

#[derive(Serialize)]
struct SignatureOutput<'a> {
    algorithm: &'static str,
    signature: &'a str,
}

#[derive(Serialize)]
struct VerifyOutput {
    valid: bool,
}

fn emit<T: Serialize>(format: Format, output: &T, value: &str) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(output)?),
        Format::Value => println!("{}", value),
    }
    Ok(())
}

// ============================================================================
// Input Helpers
// ============================================================================

/// Decodes a base64 key argument.
///
/// The decode error is dropped on purpose: it would echo key characters.
fn decode_key(key: &str) -> Result<Zeroizing<Vec<u8>>> {
    encoding::decode(key.trim())
        .map(Zeroizing::new)
        .map_err(|_| anyhow!("Key must be standard base64"))
}

fn read_input(path: Option<&Path>) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::new());
    match path {
        Some(path) => {
            *buf = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        },
        None => {
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
        },
    }
    debug!(len = buf.len(), "read input");
    Ok(buf)
}

fn read_text_input(path: Option<&Path>) -> Result<String> {
    let raw = read_input(path)?;
    let text = std::str::from_utf8(&raw).context("Input is not valid UTF-8")?;
    Ok(text.trim().to_string())
}

// ============================================================================
// Command Handlers
// ============================================================================

fn cmd_keygen(format: Format, size: KeySize) -> Result<()> {
    let key = aead::generate_key(size.byte_len())?;
    let encoded = Zeroizing::new(encoding::encode(&key));
    info!(algorithm = %size, "generated key");

    let output = KeyOutput {
        algorithm: size.to_string(),
        size: size.byte_len(),
        key: encoded.to_string(),
    };
    emit(format, &output, &encoded)
}

fn cmd_salt(format: Format, len: usize) -> Result<()> {
    let salt = random::generate_salt(len)?;
    let value = encoding::encode(&salt);
    emit(format, &BytesOutput { len, value: value.clone() }, &value)
}

fn cmd_random(format: Format, len: usize) -> Result<()> {
    let bytes = random::random_bytes(len)?;
    let value = encoding::encode(&bytes);
    emit(format, &BytesOutput { len, value: value.clone() }, &value)
}

fn cmd_encrypt(format: Format, key: &str, input: Option<&Path>, aad: Option<&str>) -> Result<()> {
    let key = decode_key(key)?;
    let plaintext = read_input(input)?;

    let blob = aead::encrypt_with_aad(&plaintext, &key, aad.map(str::as_bytes))?;
    info!(key_bits = key.len() * 8, "encrypted input");

    emit(format, &CiphertextOutput { ciphertext: &blob }, &blob)
}

fn cmd_decrypt(
    format: Format,
    key: &str,
    input: Option<&Path>,
    aad: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let key = decode_key(key)?;
    let blob = read_text_input(input)?;

    let plaintext = aead::decrypt_with_aad(&blob, &key, aad.map(str::as_bytes))?;
    info!(key_bits = key.len() * 8, "decrypted input");

    if let Some(path) = output {
        fs::write(path, &*plaintext)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }

    match format {
        Format::Value => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&plaintext)?;
            stdout.flush()?;
        },
        Format::Json => {
            let output = PlaintextOutput {
                plaintext_base64: encoding::encode(&plaintext),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        },
    }

    Ok(())
}

fn cmd_sign(format: Format, key: &str, input: Option<&Path>) -> Result<()> {
    let key = decode_key(key)?;
    let data = read_input(input)?;

    let signature = mac::sign_strict(&data, &key)?;

    let output = SignatureOutput {
        algorithm: "hmac-sha256",
        signature: &signature,
    };
    emit(format, &output, &signature)
}

fn cmd_verify(format: Format, key: &str, signature: &str, input: Option<&Path>) -> Result<bool> {
    let key = decode_key(key)?;
    let data = read_input(input)?;

    let valid = mac::verify(&data, signature.trim(), &key);
    debug!(valid, "verified signature");

    emit(
        format,
        &VerifyOutput { valid },
        if valid { "valid" } else { "invalid" },
    )?;
    Ok(valid)
}

// ============================================================================
// Main
// ============================================================================

fn init_tracing(directive: Option<&str>) {
    let filter = directive
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let format = parse_format(&cli.format)?;

    match cli.command {
        Commands::Keygen { size } => cmd_keygen(format, size)?,
        Commands::Salt { len } => cmd_salt(format, len)?,
        Commands::Random { len } => cmd_random(format, len)?,
        Commands::Encrypt { key, input, aad } => {
            cmd_encrypt(format, &key, input.as_deref(), aad.as_deref())?
        },
        Commands::Decrypt {
            key,
            input,
            aad,
            output,
        } => cmd_decrypt(
            format,
            &key,
            input.as_deref(),
            aad.as_deref(),
            output.as_deref(),
        )?,
        Commands::Sign { key, input } => cmd_sign(format, &key, input.as_deref())?,
        Commands::Verify {
            key,
            signature,
            input,
        } => {
            if !cmd_verify(format, &key, &signature, input.as_deref())? {
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
