//! Cryptographic primitives for PwVault.
//!
//! This module provides:
//! - Typed algorithm identifiers and `CipherConfig` (`algorithms`)
//! - Argon2id passphrase key derivation (`kdf`)
//! - HKDF cipher-key expansion (`keys`)
//! - AEAD sealing for each supported cipher (`encryption`)
//! - Pre-encryption compression (`compression`)
//! - The on-disk ciphertext envelope (`envelope`)
//! - The `CipherEngine` seam and its default implementation (`engine`)

pub mod algorithms;
pub mod compression;
pub mod encryption;
pub mod engine;
pub mod envelope;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CipherConfig, CipherEngine, SymmetricEngine, ...};
pub use algorithms::{CipherAlgorithm, CipherConfig, CompressionAlgorithm, DigestAlgorithm};
pub use engine::{CipherEngine, SymmetricEngine};
pub use kdf::Argon2Params;
