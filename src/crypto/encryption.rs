//! Authenticated encryption for the configured cipher.
//!
//! Each call to `seal` generates a fresh random nonce and prepends it to
//! the ciphertext.  `open` splits the nonce back out before decrypting.
//! Associated data (the envelope header) is authenticated but not stored
//! here; the caller passes the same bytes to both sides.
//!
//! Layout of the returned byte buffer:
//!   [ nonce (12 or 24 bytes) | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng, Payload};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::{ChaCha20Poly1305, XChaCha20Poly1305};
use zeroize::Zeroizing;

use super::algorithms::CipherAlgorithm;
use crate::errors::{PwVaultError, Result};

/// Encrypt `plaintext` under `key` with the chosen algorithm.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn seal(algorithm: CipherAlgorithm, key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    match algorithm {
        CipherAlgorithm::Aes256Gcm => seal_with::<Aes256Gcm>(key, plaintext, aad),
        CipherAlgorithm::ChaCha20Poly1305 => seal_with::<ChaCha20Poly1305>(key, plaintext, aad),
        CipherAlgorithm::XChaCha20Poly1305 => seal_with::<XChaCha20Poly1305>(key, plaintext, aad),
    }
}

/// Decrypt data that was produced by `seal` with the same algorithm,
/// key, and associated data.
pub fn open(
    algorithm: CipherAlgorithm,
    key: &[u8],
    sealed: &[u8],
    aad: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    match algorithm {
        CipherAlgorithm::Aes256Gcm => open_with::<Aes256Gcm>(key, sealed, aad),
        CipherAlgorithm::ChaCha20Poly1305 => open_with::<ChaCha20Poly1305>(key, sealed, aad),
        CipherAlgorithm::XChaCha20Poly1305 => open_with::<XChaCha20Poly1305>(key, sealed, aad),
    }
}

fn seal_with<C: Aead + KeyInit>(key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key)
        .map_err(|e| PwVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = C::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, Payload { msg: plaintext, aad })
        .map_err(|e| PwVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(nonce.len() + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

fn open_with<C: Aead + KeyInit>(key: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let nonce_len = <C as AeadCore>::NonceSize::USIZE;
    if sealed.len() < nonce_len {
        return Err(PwVaultError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(nonce_len);
    let nonce = Nonce::<C>::from_slice(nonce_bytes);

    let cipher = C::new_from_slice(key).map_err(|_| PwVaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, Payload { msg: ciphertext, aad })
        .map_err(|_| PwVaultError::DecryptionFailed)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0xAB; 32];

    #[test]
    fn every_algorithm_round_trips() {
        for algo in CipherAlgorithm::ALL {
            let sealed = seal(algo, &KEY, b"alice\r\np1\r\nwork", b"hdr").unwrap();
            let opened = open(algo, &KEY, &sealed, b"hdr").unwrap();
            assert_eq!(opened.as_slice(), b"alice\r\np1\r\nwork", "{algo}");
        }
    }

    #[test]
    fn nonce_is_fresh_each_time() {
        let a = seal(CipherAlgorithm::Aes256Gcm, &KEY, b"same", b"").unwrap();
        let b = seal(CipherAlgorithm::Aes256Gcm, &KEY, b"same", b"").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_or_aad_fails() {
        let sealed = seal(CipherAlgorithm::ChaCha20Poly1305, &KEY, b"secret", b"hdr").unwrap();

        let wrong_key = open(CipherAlgorithm::ChaCha20Poly1305, &[0x11; 32], &sealed, b"hdr");
        assert!(matches!(wrong_key, Err(PwVaultError::DecryptionFailed)));

        let wrong_aad = open(CipherAlgorithm::ChaCha20Poly1305, &KEY, &sealed, b"other");
        assert!(matches!(wrong_aad, Err(PwVaultError::DecryptionFailed)));
    }

    #[test]
    fn truncated_input_fails() {
        let result = open(CipherAlgorithm::XChaCha20Poly1305, &KEY, &[0u8; 10], b"");
        assert!(matches!(result, Err(PwVaultError::DecryptionFailed)));
    }

    #[test]
    fn wrong_algorithm_fails() {
        let sealed = seal(CipherAlgorithm::Aes256Gcm, &KEY, b"secret", b"").unwrap();
        assert!(open(CipherAlgorithm::ChaCha20Poly1305, &KEY, &sealed, b"").is_err());
    }
}
