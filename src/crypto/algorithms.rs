//! Typed cipher, digest, and compression identifiers.
//!
//! Each enum is a closed set.  Names parse case-insensitively (with a
//! few common aliases) and display in a canonical upper-case form, which
//! is also what gets written into the ciphertext envelope header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{PwVaultError, Result};

/// Authenticated symmetric cipher used to seal the vault payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CipherAlgorithm {
    #[default]
    Aes256Gcm,
    ChaCha20Poly1305,
    XChaCha20Poly1305,
}

/// Hash function driving HKDF sub-key expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DigestAlgorithm {
    Sha256,
    #[default]
    Sha512,
}

/// Compression applied to the plaintext before encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompressionAlgorithm {
    #[default]
    Zlib,
    /// Raw deflate stream, no zlib framing.
    Zip,
    Uncompressed,
}

impl CipherAlgorithm {
    pub const ALL: [Self; 3] = [Self::Aes256Gcm, Self::ChaCha20Poly1305, Self::XChaCha20Poly1305];

    pub fn name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "AES256-GCM",
            Self::ChaCha20Poly1305 => "CHACHA20-POLY1305",
            Self::XChaCha20Poly1305 => "XCHACHA20-POLY1305",
        }
    }
}

impl DigestAlgorithm {
    pub const ALL: [Self; 2] = [Self::Sha256, Self::Sha512];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl CompressionAlgorithm {
    pub const ALL: [Self; 3] = [Self::Zlib, Self::Zip, Self::Uncompressed];

    pub fn name(self) -> &'static str {
        match self {
            Self::Zlib => "ZLIB",
            Self::Zip => "ZIP",
            Self::Uncompressed => "UNCOMPRESSED",
        }
    }
}

impl FromStr for CipherAlgorithm {
    type Err = PwVaultError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "AES256-GCM" | "AES256GCM" | "AES256" | "AES" => Ok(Self::Aes256Gcm),
            "CHACHA20-POLY1305" | "CHACHA20POLY1305" | "CHACHA20" => Ok(Self::ChaCha20Poly1305),
            "XCHACHA20-POLY1305" | "XCHACHA20POLY1305" | "XCHACHA20" => {
                Ok(Self::XChaCha20Poly1305)
            }
            _ => Err(unsupported(s, &Self::ALL.map(Self::name))),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PwVaultError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "SHA256" | "SHA-256" => Ok(Self::Sha256),
            "SHA512" | "SHA-512" => Ok(Self::Sha512),
            _ => Err(unsupported(s, &Self::ALL.map(Self::name))),
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = PwVaultError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "ZLIB" => Ok(Self::Zlib),
            "ZIP" | "DEFLATE" => Ok(Self::Zip),
            "UNCOMPRESSED" | "NONE" => Ok(Self::Uncompressed),
            _ => Err(unsupported(s, &Self::ALL.map(Self::name))),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('_', "-")
}

fn unsupported(name: &str, supported: &[&str]) -> PwVaultError {
    PwVaultError::UnsupportedAlgorithm(format!(
        "{} (supported: {})",
        name.trim(),
        supported.join(", ")
    ))
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = PwVaultError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.name().to_string()
            }
        }
    )*};
}

string_conversions!(CipherAlgorithm, DigestAlgorithm, CompressionAlgorithm);

/// The full set of choices passed to the cipher engine on every save.
///
/// Each field can be changed independently between saves; the engine
/// records the choices inside the ciphertext so decryption never needs
/// them up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CipherConfig {
    pub algorithm: CipherAlgorithm,
    pub digest: DigestAlgorithm,
    pub compression: CompressionAlgorithm,
}

impl CipherConfig {
    pub fn new(
        algorithm: CipherAlgorithm,
        digest: DigestAlgorithm,
        compression: CompressionAlgorithm,
    ) -> Self {
        Self {
            algorithm,
            digest,
            compression,
        }
    }
}

impl fmt::Display for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.algorithm, self.digest, self.compression)
    }
}
