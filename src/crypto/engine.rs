//! The cipher engine seam used by `VaultStore`.
//!
//! `CipherEngine` is the only thing the store knows about cryptography:
//! text in, opaque bytes out, and back.  `SymmetricEngine` is the
//! passphrase-only implementation shipped with the crate.

use chrono::Utc;
use zeroize::Zeroizing;

use super::algorithms::CipherConfig;
use super::compression::{compress, decompress};
use super::encryption::{open, seal};
use super::envelope::{self, EnvelopeHeader, CURRENT_VERSION};
use super::kdf::{derive_master_key, generate_salt, Argon2Params};
use super::keys::derive_cipher_key;
use crate::errors::{PwVaultError, Result};

/// Symmetric, passphrase-based encryption of a text payload.
pub trait CipherEngine {
    /// Encrypt `plaintext` under `passphrase` with the chosen algorithms.
    fn encrypt(&self, plaintext: &str, passphrase: &str, config: &CipherConfig) -> Result<Vec<u8>>;

    /// Decrypt bytes produced by `encrypt`.  The algorithms are recovered
    /// from the ciphertext itself.
    fn decrypt(&self, ciphertext: &[u8], passphrase: &str) -> Result<Zeroizing<String>>;
}

impl<E: CipherEngine + ?Sized> CipherEngine for &E {
    fn encrypt(&self, plaintext: &str, passphrase: &str, config: &CipherConfig) -> Result<Vec<u8>> {
        (**self).encrypt(plaintext, passphrase, config)
    }

    fn decrypt(&self, ciphertext: &[u8], passphrase: &str) -> Result<Zeroizing<String>> {
        (**self).decrypt(ciphertext, passphrase)
    }
}

/// Argon2id + HKDF + AEAD engine writing the `PWVT` envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricEngine {
    /// KDF cost used for new ciphertexts.  Decryption always uses the
    /// parameters stored in the envelope.
    argon2: Argon2Params,
}

impl SymmetricEngine {
    pub fn new(argon2: Argon2Params) -> Self {
        Self { argon2 }
    }
}

impl CipherEngine for SymmetricEngine {
    fn encrypt(&self, plaintext: &str, passphrase: &str, config: &CipherConfig) -> Result<Vec<u8>> {
        self.argon2.validate()?;

        let salt = generate_salt();
        let header = EnvelopeHeader {
            version: CURRENT_VERSION,
            algorithm: config.algorithm,
            digest: config.digest,
            compression: config.compression,
            salt: salt.to_vec(),
            argon2_params: self.argon2,
            created_at: Utc::now(),
        };
        let header_bytes = envelope::encode_header(&header)?;

        let master = derive_master_key(passphrase.as_bytes(), &salt, &self.argon2)?;
        let key = derive_cipher_key(&master[..], &salt, config.digest, config.algorithm)?;

        let packed = compress(config.compression, plaintext.as_bytes())?;
        let body = seal(config.algorithm, &key[..], &packed, &header_bytes)?;

        tracing::debug!(%config, bytes = body.len(), "payload sealed");
        envelope::assemble(&header_bytes, &body)
    }

    fn decrypt(&self, ciphertext: &[u8], passphrase: &str) -> Result<Zeroizing<String>> {
        let raw = envelope::parse(ciphertext)?;
        let header = &raw.header;

        let master = derive_master_key(passphrase.as_bytes(), &header.salt, &header.argon2_params)
            .map_err(|e| match e {
                // Weak params in a stored header mean the header is not ours.
                PwVaultError::KeyDerivationFailed(msg) => PwVaultError::InvalidEnvelope(msg),
                other => other,
            })?;
        let key = derive_cipher_key(&master[..], &header.salt, header.digest, header.algorithm)?;

        let packed = open(header.algorithm, &key[..], raw.body, raw.header_bytes)?;
        let bytes = decompress(header.compression, &packed)?;

        tracing::debug!(
            algorithm = %header.algorithm,
            digest = %header.digest,
            compression = %header.compression,
            "payload opened"
        );

        let text = std::str::from_utf8(&bytes).map_err(|_| {
            PwVaultError::FormatCorruption("decrypted payload is not valid UTF-8".into())
        })?;
        Ok(Zeroizing::new(text.to_owned()))
    }
}
