//! `pwvault list`: decrypt the vault and display its entries.

use crate::cli::output;
use crate::cli::{open_store, prompt_passphrase, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, show: bool) -> Result<()> {
    let mut store = open_store(cli)?;
    let passphrase = prompt_passphrase()?;
    store.load(&passphrase)?;

    output::info(&format!(
        "{}: {} entr{}",
        store.path().display(),
        store.len(),
        if store.len() == 1 { "y" } else { "ies" }
    ));
    output::print_records_table(store.records(), show);

    Ok(())
}
