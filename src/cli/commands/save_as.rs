//! `pwvault save-as`: re-encrypt the vault into another file.
//!
//! The current cipher flags apply to the new file, so this doubles as a
//! way to change algorithm, digest, or compression.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_store, prompt_passphrase, Cli};
use crate::errors::Result;

/// Execute the `save-as` command.
pub fn execute(cli: &Cli, target: &Path) -> Result<()> {
    let mut store = open_store(cli)?;
    let passphrase = prompt_passphrase()?;
    store.load(&passphrase)?;

    let source = store.path().to_path_buf();
    store.set_path(std::env::current_dir()?.join(target));
    store.save(&passphrase)?;

    output::success(&format!(
        "Saved {} entr{} from {} to {} ({})",
        store.len(),
        if store.len() == 1 { "y" } else { "ies" },
        source.display(),
        store.path().display(),
        store.config()
    ));

    Ok(())
}
