//! Solace safety-core CLI.
//!
//! Operator tool for sealing and opening sensitive fields and for
//! screening text through the safety scanners. The master key is read
//! from the `SOLACE_MASTER_KEY` environment variable; screening
//! commands run the scanners directly and need no key.

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use solace_common::UserId;
use solace_crypto::{generate_user_key_id, EncryptedBlob};
use solace_pipeline::{PipelineConfig, SafetyPipeline};
use solace_safety::{CrisisDetector, SafetyFilter};

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Solace safety core - field encryption and text screening")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a sensitive text field for a user.
    Seal {
        /// Owning user identifier.
        #[arg(short, long)]
        user: String,

        /// Text to seal; read from stdin when omitted.
        text: Option<String>,
    },

    /// Decrypt a sealed field.
    Open {
        /// Owning user identifier.
        #[arg(short, long)]
        user: String,

        /// Blob JSON; read from stdin when omitted.
        blob: Option<String>,
    },

    /// Screen an AI-generated response for unsafe clinical phrasing.
    ScreenResponse {
        /// Text to screen; read from stdin when omitted.
        text: Option<String>,
    },

    /// Screen a user-authored message for crisis indicators.
    ScreenInput {
        /// Text to screen; read from stdin when omitted.
        text: Option<String>,
    },

    /// Generate a key bookkeeping identifier.
    Keygen,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Seal { user, text } => cmd_seal(&user, text),
        Commands::Open { user, blob } => cmd_open(&user, blob),
        Commands::ScreenResponse { text } => cmd_screen_response(text),
        Commands::ScreenInput { text } => cmd_screen_input(text),
        Commands::Keygen => {
            println!("{}", generate_user_key_id());
            Ok(())
        }
    }
}

fn pipeline() -> Result<SafetyPipeline> {
    let config = PipelineConfig::from_env().context("loading master key configuration")?;
    Ok(SafetyPipeline::new(config))
}

fn read_arg_or_stdin(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf.trim_end_matches('\n').to_string())
        }
    }
}

fn cmd_seal(user: &str, text: Option<String>) -> Result<()> {
    let pipeline = pipeline()?;
    let user = UserId::new(user)?;
    let text = read_arg_or_stdin(text)?;

    let blob = pipeline.seal_field(&text, &user)?;
    println!("{}", serde_json::to_string_pretty(&blob)?);
    Ok(())
}

fn cmd_open(user: &str, blob: Option<String>) -> Result<()> {
    let pipeline = pipeline()?;
    let user = UserId::new(user)?;
    let raw = read_arg_or_stdin(blob)?;

    let blob: EncryptedBlob = serde_json::from_str(&raw).context("parsing blob JSON")?;
    let plaintext = pipeline.open_field(&blob, &user)?;
    println!("{}", plaintext);
    Ok(())
}

fn cmd_screen_response(text: Option<String>) -> Result<()> {
    let text = read_arg_or_stdin(text)?;

    let result = SafetyFilter::new().check_response_safety(&text);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_screen_input(text: Option<String>) -> Result<()> {
    let text = read_arg_or_stdin(text)?;

    let assessment = CrisisDetector::new().assess_user_input(&text);
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
