//! `pwvault generate`: print a random password, or a passphrase when a
//! word list is given.

use std::path::Path;

use crate::cli::output;
use crate::errors::{PwVaultError, Result};
use crate::vault::generator::{generate_passphrase, generate_password, load_word_list};

/// Execute the `generate` command.
pub fn execute(length: usize, words: Option<&Path>, count: usize) -> Result<()> {
    let password = generate_password(length);

    match words {
        Some(path) => {
            let list = load_word_list(path)?;
            let phrase = generate_passphrase(&list, count).ok_or_else(|| {
                PwVaultError::CommandFailed(format!("word list {} is empty", path.display()))
            })?;
            println!("{}\t{}", password.as_str(), phrase.as_str());
        }
        None => {
            println!("{}", password.as_str());
            if length < 12 {
                output::warning("Passwords shorter than 12 characters are easy to brute-force.");
            }
        }
    }

    Ok(())
}
