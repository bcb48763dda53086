//! Command-line interface.

pub mod completions;
pub mod output;
pub mod transform;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants;
use crate::core::types::Direction;

/// Encrypt and decrypt data through a remote transit-encryption service.
#[derive(Parser)]
#[command(
    name = "portage",
    about = "Encrypt and decrypt data through a remote transit-encryption service",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a string or file using the remote transit engine
    Encrypt(TransitArgs),

    /// Decrypt a string or file using the remote transit engine
    Decrypt(TransitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Flags shared by `encrypt` and `decrypt`.
#[derive(Args, Debug)]
pub struct TransitArgs {
    /// Service address (or use VAULT_ADDR env var)
    #[arg(long)]
    pub vault_addr: Option<String>,

    /// Access token (or use VAULT_TOKEN env var)
    #[arg(long)]
    pub vault_token: Option<String>,

    /// Transit engine mount path
    #[arg(long, default_value = constants::DEFAULT_ENGINE_PATH)]
    pub engine_path: String,

    /// Transit key name
    #[arg(long)]
    pub key: String,

    /// Maximum items per bulk operation
    #[arg(long, default_value_t = constants::DEFAULT_BATCH_LIMIT)]
    pub batch_limit: usize,

    /// Write the result back over the input file
    #[arg(long = "override")]
    pub override_file: bool,

    /// Output destination folder
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// File to transform
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Text to transform
    #[arg(long)]
    pub text: Option<String>,

    /// Keep blank lines as blank output lines instead of dropping them
    #[arg(long)]
    pub preserve_empty: bool,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    match command {
        Command::Encrypt(args) => transform::execute(Direction::Encrypt, args),
        Command::Decrypt(args) => transform::execute(Direction::Decrypt, args),
        Command::Completions { shell } => completions::execute(shell),
    }
}
