//! `pwvault algorithms`: show the identifiers accepted by `--algo`,
//! `--digest`, and `--compress`.

use comfy_table::{ContentArrangement, Table};

use crate::crypto::{CipherAlgorithm, CipherConfig, CompressionAlgorithm, DigestAlgorithm};
use crate::errors::Result;

/// Execute the `algorithms` command.
pub fn execute() -> Result<()> {
    let defaults = CipherConfig::default();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Names", "Default"]);
    table.add_row(vec![
        "Cipher".to_string(),
        join(CipherAlgorithm::ALL.map(CipherAlgorithm::name)),
        defaults.algorithm.to_string(),
    ]);
    table.add_row(vec![
        "Digest".to_string(),
        join(DigestAlgorithm::ALL.map(DigestAlgorithm::name)),
        defaults.digest.to_string(),
    ]);
    table.add_row(vec![
        "Compression".to_string(),
        join(CompressionAlgorithm::ALL.map(CompressionAlgorithm::name)),
        defaults.compression.to_string(),
    ]);

    println!("{table}");
    Ok(())
}

fn join<const N: usize>(names: [&str; N]) -> String {
    names.join(", ")
}
