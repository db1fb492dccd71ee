// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Operator CLI for record integrity keys and export audits

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use record_integrity::audit::audit_export;
use record_integrity::config::Config;
use record_integrity::core::constants::config::{
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
};
use record_integrity::{KeyPair, PublicKey, RecordBinder};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the configured public key PEM exactly as stored
    PublicKey,

    /// Load both key halves and check that they belong together
    CheckKeys,

    /// Fingerprint and sign a plaintext value (e.g. to backfill a record)
    Seal {
        /// Value to seal, used exactly as given
        plaintext: String,
    },

    /// Verify every record in an exported users.bin
    Audit {
        /// Export file to verify
        file: PathBuf,

        /// Public key PEM file (defaults to the configured public key)
        #[arg(long)]
        public_key: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Before reading LOG_LEVEL / LOG_FORMAT so `.env` can set them too
    Config::load_dotenv();

    let log_level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let log_format =
        std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| DEFAULT_LOG_FORMAT.to_string());
    if let Err(e) = init_tracing(&log_level, &log_format) {
        eprintln!("Logging error: {}", e);
        return ExitCode::from(2);
    }

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format_args!("{:#}", e), "Command failed");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::PublicKey => {
            let pem = Config::public_key_from_env()?;
            // Validate before printing so a broken key never leaves the tool
            PublicKey::from_pem(&pem)?;
            print!("{}", pem);
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckKeys => {
            let config = Config::from_env()?;
            let key_pair = KeyPair::from_config(&config)?;
            let public_key = key_pair.public_key();
            println!(
                "{}",
                json!({
                    "keyId": public_key.fingerprint(),
                    "modulusBits": public_key.modulus_bits(),
                })
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Seal { plaintext } => {
            let config = Config::from_env()?;
            let binder = RecordBinder::new(Arc::new(KeyPair::from_config(&config)?));
            let seal = binder.bind(&plaintext)?;
            println!("{}", serde_json::to_string_pretty(&seal)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Audit {
            file,
            public_key,
            json,
        } => {
            let pem = match public_key {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read public key {:?}", path))?,
                None => Config::public_key_from_env()?,
            };
            let public_key = PublicKey::from_pem(&pem)?;

            let bytes =
                std::fs::read(&file).with_context(|| format!("Cannot read export {:?}", file))?;
            let report = audit_export(&bytes, &public_key)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} of {} records verified (key {})",
                    report.verified, report.total, report.key_id
                );
                for entry in report.failures() {
                    println!("  #{} {}: {}", entry.index, entry.id, entry.verdict);
                }
            }

            info!(total = report.total, failed = report.failed(), "Audit finished");
            Ok(if report.all_verified() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

/// Initialize tracing subscriber; logs go to stderr so stdout stays parseable
fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let level = parse_log_level(level)?;

    // Create filter from RUST_LOG env var or config
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str().to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> Result<tracing::Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        _ => Err(anyhow::anyhow!("Invalid log level: {}", level)),
    }
}
