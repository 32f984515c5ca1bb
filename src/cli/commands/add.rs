//! `pwvault add`: add an entry to the vault.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_store, prompt_passphrase, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::generator::{generate_password, DEFAULT_LENGTH};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    username: &str,
    password: Option<&str>,
    generate: bool,
    note: &str,
) -> Result<()> {
    // Determine the entry password from one of four sources.
    let entry_password = if generate {
        generate_password(DEFAULT_LENGTH)
    } else if let Some(p) = password {
        output::warning("Password provided on command line; it may appear in shell history.");
        Zeroizing::new(p.to_string())
    } else if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let piped = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        if piped.is_empty() {
            return Err(PwVaultError::CommandFailed(format!(
                "no password for '{username}' on stdin"
            )));
        }
        piped
    } else {
        let p = dialoguer::Password::new()
            .with_prompt(format!("Password for {username}"))
            .interact()
            .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(p)
    };

    let mut store = open_store(cli)?;
    let passphrase = prompt_passphrase()?;
    store.load(&passphrase)?;

    if !store.add(username, &entry_password, note) {
        output::info(&format!("'{username}' with that password and note is already stored."));
        return Ok(());
    }
    store.save(&passphrase)?;

    output::success(&format!(
        "Added '{}' to {} ({} total)",
        username,
        store.path().display(),
        store.len()
    ));
    if generate {
        output::tip("Run `pwvault list --show` to see the generated password.");
    }

    Ok(())
}
