//! Binary ciphertext envelope written to the vault file.
//!
//! ```text
//! [PWVT: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON][nonce || ciphertext + tag]
//! ```
//!
//! - **Magic** (`PWVT`): identifies the file as a PwVault ciphertext.
//! - **Version**: envelope format version (currently `1`).
//! - **Header length**: little-endian u32 telling us where the header
//!   JSON ends and the sealed body begins.
//! - **Header JSON**: serialized `EnvelopeHeader`.  These exact bytes are
//!   the AEAD associated data, so editing the header breaks decryption.
//! - **Body**: output of `encryption::seal`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::algorithms::{CipherAlgorithm, CompressionAlgorithm, DigestAlgorithm};
use super::kdf::Argon2Params;
use crate::errors::{PwVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every encrypted vault file.
const MAGIC: &[u8; 4] = b"PWVT";

/// Current envelope format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

// ---------------------------------------------------------------------------
// EnvelopeHeader
// ---------------------------------------------------------------------------

/// Everything needed to re-derive the key and open the body, given only
/// the passphrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    /// Format version.
    pub version: u8,

    pub algorithm: CipherAlgorithm,
    pub digest: DigestAlgorithm,
    pub compression: CompressionAlgorithm,

    /// Argon2id salt (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// Argon2id parameters used for this ciphertext.
    pub argon2_params: Argon2Params,

    /// When this ciphertext was written.
    pub created_at: DateTime<Utc>,
}

/// A parsed envelope, keeping the header bytes exactly as stored so they
/// can be fed back as associated data without re-serializing.
pub struct RawEnvelope<'a> {
    pub header: EnvelopeHeader,
    pub header_bytes: &'a [u8],
    pub body: &'a [u8],
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Serialize a header to the bytes that go on disk (and into the AAD).
pub fn encode_header(header: &EnvelopeHeader) -> Result<Vec<u8>> {
    serde_json::to_vec(header)
        .map_err(|e| PwVaultError::SerializationError(format!("envelope header: {e}")))
}

/// Build the full envelope from already-encoded header bytes and the
/// sealed body.
pub fn assemble(header_bytes: &[u8], body: &[u8]) -> Result<Vec<u8>> {
    let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
        PwVaultError::SerializationError(format!(
            "header length {} exceeds u32::MAX",
            header_bytes.len()
        ))
    })?;

    let mut buf = Vec::with_capacity(PREFIX_LEN + header_bytes.len() + body.len());
    buf.extend_from_slice(MAGIC);
    buf.push(CURRENT_VERSION);
    buf.extend_from_slice(&header_len.to_le_bytes());
    buf.extend_from_slice(header_bytes);
    buf.extend_from_slice(body);
    Ok(buf)
}

/// Split an envelope into header and body, validating its framing.
pub fn parse(data: &[u8]) -> Result<RawEnvelope<'_>> {
    if data.len() < PREFIX_LEN {
        return Err(PwVaultError::InvalidEnvelope(
            "data too small to be a vault ciphertext".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(PwVaultError::InvalidEnvelope("missing PWVT magic bytes".into()));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(PwVaultError::InvalidEnvelope(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let header_len_u32 = u32::from_le_bytes([data[5], data[6], data[7], data[8]]);
    let header_len = usize::try_from(header_len_u32).map_err(|_| {
        PwVaultError::InvalidEnvelope(format!(
            "header length {header_len_u32} exceeds platform address space"
        ))
    })?;

    let header_end = PREFIX_LEN
        .checked_add(header_len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| PwVaultError::InvalidEnvelope("header length exceeds data size".into()))?;

    let header_bytes = &data[PREFIX_LEN..header_end];
    let body = &data[header_end..];

    let header: EnvelopeHeader = serde_json::from_slice(header_bytes)
        .map_err(|e| PwVaultError::InvalidEnvelope(format!("header JSON: {e}")))?;

    if header.version != version {
        return Err(PwVaultError::InvalidEnvelope(format!(
            "header version {} does not match envelope version {version}",
            header.version
        )));
    }

    Ok(RawEnvelope {
        header,
        header_bytes,
        body,
    })
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> EnvelopeHeader {
        EnvelopeHeader {
            version: CURRENT_VERSION,
            algorithm: CipherAlgorithm::Aes256Gcm,
            digest: DigestAlgorithm::Sha512,
            compression: CompressionAlgorithm::Zlib,
            salt: vec![9u8; 32],
            argon2_params: Argon2Params::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn assemble_then_parse() {
        let header_bytes = encode_header(&header()).unwrap();
        let data = assemble(&header_bytes, b"sealed-body").unwrap();

        let raw = parse(&data).unwrap();
        assert_eq!(raw.header_bytes, header_bytes.as_slice());
        assert_eq!(raw.body, b"sealed-body");
        assert_eq!(raw.header.salt, vec![9u8; 32]);
        assert_eq!(raw.header.algorithm, CipherAlgorithm::Aes256Gcm);
    }

    #[test]
    fn rejects_bad_magic() {
        let header_bytes = encode_header(&header()).unwrap();
        let mut data = assemble(&header_bytes, b"x").unwrap();
        data[0] = b'X';
        assert!(matches!(parse(&data), Err(PwVaultError::InvalidEnvelope(_))));
    }

    #[test]
    fn rejects_unknown_version() {
        let header_bytes = encode_header(&header()).unwrap();
        let mut data = assemble(&header_bytes, b"x").unwrap();
        data[4] = 99;
        assert!(matches!(parse(&data), Err(PwVaultError::InvalidEnvelope(_))));
    }

    #[test]
    fn rejects_oversized_header_length() {
        let mut data = Vec::new();
        data.extend_from_slice(MAGIC);
        data.push(CURRENT_VERSION);
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        data.extend_from_slice(b"{}");
        assert!(matches!(parse(&data), Err(PwVaultError::InvalidEnvelope(_))));
    }

    #[test]
    fn rejects_short_and_foreign_input() {
        assert!(parse(b"").is_err());
        assert!(parse(b"-----BEGIN PGP MESSAGE-----").is_err());
    }
}
