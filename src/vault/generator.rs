//! Throwaway password and passphrase generation.

use std::fs;
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{PwVaultError, Result};

/// Default length of a generated password.
pub const DEFAULT_LENGTH: usize = 32;

/// Default number of words in a generated passphrase.
pub const DEFAULT_WORD_COUNT: usize = 4;

/// Generate a password of `length` printable ASCII characters, excluding
/// space (`!` through `~`).
pub fn generate_password(length: usize) -> Zeroizing<String> {
    let mut rng = rand::rng();
    Zeroizing::new(
        (0..length)
            .map(|_| char::from(rng.random_range(33u8..=126)))
            .collect(),
    )
}

/// Join `count` words picked at random from `words` with spaces.
///
/// Returns `None` when the word list is empty.
pub fn generate_passphrase(words: &[String], count: usize) -> Option<Zeroizing<String>> {
    if words.is_empty() {
        return None;
    }
    let mut rng = rand::rng();
    let picked: Vec<&str> = (0..count)
        .filter_map(|_| words.choose(&mut rng).map(String::as_str))
        .collect();
    Some(Zeroizing::new(picked.join(" ")))
}

/// Read a word list, one word per line.  Blank lines are skipped.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        PwVaultError::CommandFailed(format!("cannot read word list {}: {e}", path.display()))
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect())
}
