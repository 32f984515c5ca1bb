//! `pwvault remove`: remove matching entries from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, prompt_passphrase, Cli};
use crate::errors::{PwVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, username: &str, password: &str, note: &str, force: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove every entry for '{username}' with that password?"))
            .default(false)
            .interact()
            .map_err(|e| PwVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut store = open_store(cli)?;
    let passphrase = prompt_passphrase()?;
    store.load(&passphrase)?;

    let removed = store.remove(username, password, note);
    if removed == 0 {
        output::info(&format!("No entry for '{username}' matched; nothing removed."));
        return Ok(());
    }
    store.save(&passphrase)?;

    output::success(&format!(
        "Removed {removed} entr{} for '{username}' ({} left)",
        if removed == 1 { "y" } else { "ies" },
        store.len()
    ));

    Ok(())
}
