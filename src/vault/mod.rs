//! Vault module: the encrypted record store.
//!
//! This module provides:
//! - The `Record` credential triple (`record`)
//! - The delimiter-joined plaintext payload format (`codec`)
//! - `VaultStore`, which loads, mutates, and saves a vault file (`store`)
//! - A throwaway password generator (`generator`)

pub mod codec;
pub mod generator;
pub mod record;
pub mod store;

// Re-export the most commonly used items.
pub use codec::{Delimiter, SEP_SIZE};
pub use record::Record;
pub use store::VaultStore;
