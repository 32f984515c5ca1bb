//! Cipher key expansion using HKDF.
//!
//! The Argon2id master key is never used directly.  HKDF (RFC 5869) over
//! the configured digest expands it into a cipher key bound to the
//! algorithm name, so the same passphrase and salt give unrelated keys
//! for different ciphers.

use hkdf::Hkdf;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use super::algorithms::{CipherAlgorithm, DigestAlgorithm};
use crate::errors::{PwVaultError, Result};

/// Length of the expanded cipher key (256 bits).
pub const CIPHER_KEY_LEN: usize = 32;

/// Expand a cipher key for `algorithm` from the master key.
///
/// `info` is `"pwvault-cipher:<ALGO>"`; the salt that fed Argon2id is
/// reused as the HKDF salt.
pub fn derive_cipher_key(
    master_key: &[u8],
    salt: &[u8],
    digest: DigestAlgorithm,
    algorithm: CipherAlgorithm,
) -> Result<Zeroizing<[u8; CIPHER_KEY_LEN]>> {
    let info = format!("pwvault-cipher:{algorithm}");
    let mut okm = Zeroizing::new([0u8; CIPHER_KEY_LEN]);

    let expanded = match digest {
        DigestAlgorithm::Sha256 => {
            Hkdf::<Sha256>::new(Some(salt), master_key).expand(info.as_bytes(), &mut okm[..])
        }
        DigestAlgorithm::Sha512 => {
            Hkdf::<Sha512>::new(Some(salt), master_key).expand(info.as_bytes(), &mut okm[..])
        }
    };
    expanded
        .map_err(|e| PwVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}
