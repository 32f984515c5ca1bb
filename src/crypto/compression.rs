//! Plaintext compression applied before sealing.

use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;
use zeroize::Zeroizing;

use super::algorithms::CompressionAlgorithm;
use crate::errors::{PwVaultError, Result};

/// Compress `data` with the chosen algorithm.
pub fn compress(algorithm: CompressionAlgorithm, data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let out = match algorithm {
        CompressionAlgorithm::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()?
        }
        CompressionAlgorithm::Zip => {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            encoder.finish()?
        }
        CompressionAlgorithm::Uncompressed => data.to_vec(),
    };
    Ok(Zeroizing::new(out))
}

/// Reverse `compress`.
///
/// A stream that fails to inflate is reported as `DecryptionFailed`: it
/// only happens when authenticated data was produced by a broken writer.
pub fn decompress(algorithm: CompressionAlgorithm, data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(Vec::new());
    let inflated = match algorithm {
        CompressionAlgorithm::Zlib => ZlibDecoder::new(data).read_to_end(&mut out),
        CompressionAlgorithm::Zip => DeflateDecoder::new(data).read_to_end(&mut out),
        CompressionAlgorithm::Uncompressed => {
            out.extend_from_slice(data);
            Ok(data.len())
        }
    };
    inflated.map_err(|e| {
        tracing::warn!(%algorithm, error = %e, "payload failed to decompress");
        PwVaultError::DecryptionFailed
    })?;
    Ok(out)
}
