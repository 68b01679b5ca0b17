//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KeyStretcherError, Result};

/// Environment variable checked for the password before prompting.
pub const PASSWORD_ENV: &str = "KEY_STRETCHER_PASSWORD";

/// Environment variable used for the salt seed when `--salt` is absent.
pub const SALT_ENV: &str = "KEY_STRETCHER_SALT";

/// key-stretcher: derive a key with scrypt and Argon2d combined by XOR.
#[derive(Parser)]
#[command(
    name = "key-stretcher",
    about = "Derive a key from a password with scrypt and Argon2d combined by XOR",
    version,
    after_help = "Example usage: key-stretcher -N1024 -r8 -p1 -t1 -i1 -m1024 -d1 -ssomesalt"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// scrypt CPU/memory cost (power of two)
    #[arg(short = 'N', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub scrypt_cost: Option<u64>,

    /// scrypt block size
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub scrypt_block_size: Option<u32>,

    /// scrypt parallelization
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub scrypt_parallelism: Option<u32>,

    /// scrypt threads (can be modified without affecting the hash)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub scrypt_threads: Option<u32>,

    /// argon2 memory size in KiB
    #[arg(short = 'm', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub argon2_memory: Option<u32>,

    /// argon2 iterations
    #[arg(short = 'i', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub argon2_iterations: Option<u32>,

    /// argon2 degree of parallelism
    #[arg(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub argon2_parallelism: Option<u32>,

    /// Salt seed (hashed with SHA-256 before use)
    #[arg(short = 's', long, env = SALT_ENV)]
    pub salt: Option<String>,

    /// Config file (default: ./.key-stretcher.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print only the final key
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// All available subcommands.  Without one, the password is stretched.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Load the config file (explicit `--config` or the working directory's
    /// `.key-stretcher.toml`) and apply command-line overrides on top.
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::load_file(path)?,
            None => Settings::load(&std::env::current_dir()?)?,
        };
        Ok(self.apply_overrides(base))
    }

    /// Flags win over whatever the config file says.
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(salt) = &self.salt {
            settings.salt = salt.clone();
        }
        if let Some(v) = self.scrypt_cost {
            settings.scrypt_cost = v;
        }
        if let Some(v) = self.scrypt_block_size {
            settings.scrypt_block_size = v;
        }
        if let Some(v) = self.scrypt_parallelism {
            settings.scrypt_parallelism = v;
        }
        if let Some(v) = self.scrypt_threads {
            settings.scrypt_threads = v;
        }
        if let Some(v) = self.argon2_memory {
            settings.argon2_memory_kib = v;
        }
        if let Some(v) = self.argon2_iterations {
            settings.argon2_iterations = v;
        }
        if let Some(v) = self.argon2_parallelism {
            settings.argon2_parallelism = v;
        }
        settings
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Install the `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output
/// for this crate and everything else stays at `warn`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,key_stretcher=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) is harmless, so the error is dropped.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Get the password to hash, trying in order:
/// 1. `KEY_STRETCHER_PASSWORD` env var
/// 2. One line from stdin, when stdin is not a terminal (pipes, scripts)
/// 3. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
/// An empty password is rejected here, before any KDF work.
pub fn read_password() -> Result<Zeroizing<String>> {
    let password = if let Some(pw) = password_from_env() {
        pw
    } else if !std::io::stdin().is_terminal() {
        read_password_line(std::io::stdin().lock())?
    } else {
        let pw = dialoguer::Password::new()
            .with_prompt("Please enter a password to hash")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| KeyStretcherError::CommandFailed(format!("password prompt: {e}")))?;
        Zeroizing::new(pw)
    };

    if password.is_empty() {
        return Err(KeyStretcherError::EmptyPassword);
    }
    Ok(password)
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Read a single line and strip exactly one `\n` or `\r\n` terminator.
///
/// Any other carriage return belongs to the password.
fn read_password_line(mut reader: impl BufRead) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    reader.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
