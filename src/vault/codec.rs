//! Plaintext payload format for the record list.
//!
//! ```text
//! DELIM || user_1 CRLF pass_1 CRLF note_1 || DELIM || user_2 CRLF ... || DELIM || ... note_n
//! ```
//!
//! `DELIM` is `SEP_SIZE` random printable ASCII characters.  It is written
//! once in front of the first record as well as between records, so the
//! decoder recovers it from the first `SEP_SIZE` characters and needs no
//! side channel.
//!
//! The format cannot represent a field that contains CRLF or the
//! delimiter itself.  `encode` refuses such records instead of writing a
//! payload that would decode to something else; existing stores stay
//! readable because the wire format is unchanged.

use std::fmt;

use rand::Rng;
use zeroize::Zeroizing;

use super::record::Record;
use crate::errors::{PwVaultError, Result};

/// Number of characters in the record delimiter.
pub const SEP_SIZE: usize = 10;

/// Separator between the three fields of one record.
pub const FIELD_SEP: &str = "\r\n";

/// Lowest and highest byte a generated delimiter may contain (space to `~`).
const DELIM_MIN: u8 = 32;
const DELIM_MAX: u8 = 126;

// ---------------------------------------------------------------------------
// Delimiter
// ---------------------------------------------------------------------------

/// The record delimiter.  One is generated per store and kept for the
/// lifetime of that store.
#[derive(Clone, PartialEq, Eq)]
pub struct Delimiter(String);

impl Delimiter {
    /// Generate a fresh random delimiter.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let value = (0..SEP_SIZE)
            .map(|_| char::from(rng.random_range(DELIM_MIN..=DELIM_MAX)))
            .collect();
        Self(value)
    }

    /// Use a caller-chosen delimiter.  It must be exactly `SEP_SIZE`
    /// printable ASCII characters.
    pub fn new(value: &str) -> Result<Self> {
        let printable = value.bytes().all(|b| (DELIM_MIN..=DELIM_MAX).contains(&b));
        if value.len() != SEP_SIZE || !printable {
            return Err(PwVaultError::ConfigError(format!(
                "delimiter must be exactly {SEP_SIZE} printable ASCII characters"
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Debug for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Delimiter").field(&self.0).finish()
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Serialize `records` into the plaintext payload.
///
/// Returns `Ok(None)` for an empty list: there is nothing to encrypt.
pub fn encode(records: &[Record], delimiter: &Delimiter) -> Result<Option<Zeroizing<String>>> {
    if records.is_empty() {
        return Ok(None);
    }

    let delim = delimiter.as_str();
    for (index, record) in records.iter().enumerate() {
        for field in record.fields() {
            if field.contains(FIELD_SEP) {
                return Err(PwVaultError::UnencodableRecord(format!(
                    "record {} contains a CRLF line break",
                    index + 1
                )));
            }
            if field.contains(delim) {
                return Err(PwVaultError::UnencodableRecord(format!(
                    "record {} contains the record delimiter",
                    index + 1
                )));
            }
        }
    }

    let capacity = records
        .iter()
        .map(|r| delim.len() + r.fields().iter().map(|f| f.len()).sum::<usize>() + 2 * FIELD_SEP.len())
        .sum();
    let mut out = Zeroizing::new(String::with_capacity(capacity));
    for record in records {
        out.push_str(delim);
        let [username, password, note] = record.fields();
        out.push_str(username);
        out.push_str(FIELD_SEP);
        out.push_str(password);
        out.push_str(FIELD_SEP);
        out.push_str(note);
    }

    // A field ending in a prefix of the delimiter can still fuse with the
    // delimiter that follows it; only a full decode catches that.
    match decode(&out) {
        Ok(decoded) if decoded == records => {}
        _ => {
            return Err(PwVaultError::UnencodableRecord(
                "record fields collide with the record delimiter".into(),
            ));
        }
    }

    Ok(Some(out))
}

/// Rebuild the record list from a decrypted payload.
///
/// An empty payload is an empty list.  Anything else must start with a
/// `SEP_SIZE`-character delimiter followed by delimiter-joined records of
/// exactly three CRLF-separated fields; otherwise `FormatCorruption`.
pub fn decode(plaintext: &str) -> Result<Vec<Record>> {
    if plaintext.is_empty() {
        return Ok(Vec::new());
    }

    let split_at = match plaintext.char_indices().nth(SEP_SIZE) {
        Some((index, _)) => index,
        None if plaintext.chars().count() == SEP_SIZE => plaintext.len(),
        None => {
            return Err(PwVaultError::FormatCorruption(format!(
                "payload is shorter than the {SEP_SIZE}-character delimiter"
            )));
        }
    };
    let (delim, body) = plaintext.split_at(split_at);

    body.split(delim)
        .enumerate()
        .map(|(index, chunk)| {
            let fields: Vec<&str> = chunk.split(FIELD_SEP).collect();
            match fields.as_slice() {
                [username, password, note] => Ok(Record::new(*username, *password, *note)),
                other => Err(PwVaultError::FormatCorruption(format!(
                    "record {} has {} field(s), expected 3",
                    index + 1,
                    other.len()
                ))),
            }
        })
        .collect()
}
