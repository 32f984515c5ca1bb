use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PwVault.
#[derive(Debug, Error)]
pub enum PwVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Could not decrypt: wrong passphrase or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid ciphertext envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Unsupported algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    // --- Store errors ---
    #[error("Vault payload is corrupted: {0}")]
    FormatCorruption(String),

    #[error("Record cannot be encoded: {0}")]
    UnencodableRecord(String),

    #[error("Backup of {0} failed: {1}")]
    BackupFailed(PathBuf, std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl PwVaultError {
    /// Returns `true` for errors the UI should treat as "could not decrypt"
    /// (wrong passphrase, tampered or foreign ciphertext).
    pub fn is_decrypt_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed | Self::InvalidEnvelope(_))
    }
}

/// Convenience type alias for PwVault results.
pub type Result<T> = std::result::Result<T, PwVaultError>;
