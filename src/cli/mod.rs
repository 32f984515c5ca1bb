//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::{CipherAlgorithm, CompressionAlgorithm, DigestAlgorithm, SymmetricEngine};
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultStore;

/// Environment variable consulted before prompting for the passphrase.
pub const PASSWORD_ENV: &str = "PWVAULT_PASSWORD";

/// Environment variable that stands in for `--file`.
pub const FILE_ENV: &str = "PWVAULT_FILE";

/// PwVault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Local passphrase-encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `default_file` from .pwvault.toml, or ./passwords)
    #[arg(short, long, global = true, env = FILE_ENV)]
    pub file: Option<PathBuf>,

    /// Cipher used when saving (e.g. AES256-GCM, CHACHA20-POLY1305)
    #[arg(long, global = true)]
    pub algo: Option<CipherAlgorithm>,

    /// Digest used for key expansion when saving (SHA256, SHA512)
    #[arg(long, global = true)]
    pub digest: Option<DigestAlgorithm>,

    /// Compression used when saving (ZLIB, ZIP, UNCOMPRESSED)
    #[arg(long, global = true)]
    pub compress: Option<CompressionAlgorithm>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List all entries
    List {
        /// Show passwords and notes instead of masking them
        #[arg(long)]
        show: bool,
    },

    /// Add an entry (exact duplicates are ignored)
    Add {
        /// Username or login
        username: String,
        /// Entry password (omit for piped input or a hidden prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate a random password for this entry
        #[arg(short, long)]
        generate: bool,
        /// Free-form note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Remove every entry matching username, password, and note exactly
    Remove {
        /// Username or login
        username: String,
        /// Entry password
        password: String,
        /// Note of the entry to remove
        #[arg(short, long, default_value = "")]
        note: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Re-encrypt the vault into a new file
    SaveAs {
        /// Destination vault file
        target: PathBuf,
    },

    /// Print a random password or passphrase
    Generate {
        /// Password length
        #[arg(short, long, default_value_t = crate::vault::generator::DEFAULT_LENGTH)]
        length: usize,
        /// Word list (one word per line) to build a passphrase from
        #[arg(short, long)]
        words: Option<PathBuf>,
        /// Number of words in the passphrase
        #[arg(short, long, default_value_t = crate::vault::generator::DEFAULT_WORD_COUNT)]
        count: usize,
    },

    /// List the supported cipher, digest, and compression names
    Algorithms,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault passphrase, trying in order:
/// 1. `PWVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Vault passphrase")
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Build a store from `.pwvault.toml` in the working directory, with
/// command-line flags taking precedence.  Nothing is read from disk yet.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let path = match &cli.file {
        Some(file) => cwd.join(file),
        None => settings.vault_path(&cwd),
    };

    let mut config = settings.cipher_config();
    if let Some(algo) = cli.algo {
        config.algorithm = algo;
    }
    if let Some(digest) = cli.digest {
        config.digest = digest;
    }
    if let Some(compress) = cli.compress {
        config.compression = compress;
    }

    let engine = SymmetricEngine::new(settings.argon2_params());
    Ok(VaultStore::with_engine(path, config, engine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_typed_algorithm_flags() {
        let cli = Cli::try_parse_from([
            "pwvault",
            "--algo",
            "chacha20-poly1305",
            "--digest",
            "sha256",
            "--compress",
            "none",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.algo, Some(CipherAlgorithm::ChaCha20Poly1305));
        assert_eq!(cli.digest, Some(DigestAlgorithm::Sha256));
        assert_eq!(cli.compress, Some(CompressionAlgorithm::Uncompressed));
    }

    #[test]
    fn rejects_unknown_algorithm_flag() {
        let result = Cli::try_parse_from(["pwvault", "--algo", "TWOFISH", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn add_password_conflicts_with_generate() {
        let result = Cli::try_parse_from(["pwvault", "add", "alice", "-p", "x", "-g"]);
        assert!(result.is_err());
    }
}
