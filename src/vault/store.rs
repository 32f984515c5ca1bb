//! High-level vault operations used by the CLI (or any other front-end).
//!
//! `VaultStore` owns the in-memory record list, the backing file path,
//! and the cipher choices.  All cryptography goes through a
//! `CipherEngine`, so a front-end only deals with `add`, `remove`,
//! `load(passphrase)` and `save(passphrase)`.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::{
    CipherAlgorithm, CipherConfig, CipherEngine, CompressionAlgorithm, DigestAlgorithm,
    SymmetricEngine,
};
use crate::errors::{PwVaultError, Result};

use super::codec::{self, Delimiter};
use super::record::Record;

/// Suffix appended to the backing path for the previous ciphertext.
const BACKUP_SUFFIX: &str = ".bak";

/// The main vault handle.
pub struct VaultStore<E: CipherEngine = SymmetricEngine> {
    /// Path to the encrypted file on disk.
    path: PathBuf,

    /// Algorithm, digest, and compression used by the next save.
    config: CipherConfig,

    /// Records in insertion order.
    records: Vec<Record>,

    /// Record delimiter, fixed for the lifetime of this store.
    delimiter: Delimiter,

    engine: E,
}

impl VaultStore<SymmetricEngine> {
    /// Create an empty store backed by `path`, using the default engine.
    ///
    /// Nothing is read or written until `load` or `save`.
    pub fn new(path: impl Into<PathBuf>, config: CipherConfig) -> Self {
        Self::with_engine(path, config, SymmetricEngine::default())
    }
}

impl<E: CipherEngine> VaultStore<E> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create an empty store that encrypts through `engine`.
    pub fn with_engine(path: impl Into<PathBuf>, config: CipherConfig, engine: E) -> Self {
        Self {
            path: path.into(),
            config,
            records: Vec::new(),
            delimiter: Delimiter::random(),
            engine,
        }
    }

    /// Replace the generated delimiter.  Only useful for reproducible
    /// payloads; a store normally keeps the one it was built with.
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Append a record unless an identical one is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn add(&mut self, username: &str, password: &str, note: &str) -> bool {
        if self.records.iter().any(|r| r.matches(username, password, note)) {
            return false;
        }
        self.records.push(Record::new(username, password, note));
        true
    }

    /// Remove every record equal to the given triple.
    ///
    /// Returns how many were removed (zero is not an error).
    pub fn remove(&mut self, username: &str, password: &str, note: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.matches(username, password, note));
        before - self.records.len()
    }

    /// Records whose username is exactly `username`, in list order.
    pub fn find<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.username == username)
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize the current records.  `None` means the list is empty and
    /// there is nothing to encrypt.
    pub fn encode(&self) -> Result<Option<Zeroizing<String>>> {
        codec::encode(&self.records, &self.delimiter)
    }

    /// Parse a decrypted payload.  The delimiter is read from the payload
    /// itself, so payloads from other stores decode too.
    pub fn decode(&self, plaintext: &str) -> Result<Vec<Record>> {
        codec::decode(plaintext)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read and decrypt the backing file, replacing the in-memory list.
    ///
    /// A missing file is created empty first.  An empty file is an empty
    /// vault.  On any error the in-memory list and the file are left as
    /// they were.
    pub fn load(&mut self, passphrase: &str) -> Result<&[Record]> {
        if !self.path.exists() {
            self.create_empty_file()?;
            tracing::info!(path = %self.path.display(), "created empty vault file");
        }

        let ciphertext = fs::read(&self.path)?;
        let records = if ciphertext.is_empty() {
            Vec::new()
        } else {
            let plaintext = self.engine.decrypt(&ciphertext, passphrase).map_err(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "could not decrypt vault");
                e
            })?;
            codec::decode(&plaintext)?
        };

        tracing::debug!(path = %self.path.display(), records = records.len(), "vault loaded");
        self.records = records;
        Ok(&self.records)
    }

    /// Encrypt the current records and write them to the backing file.
    ///
    /// An empty list truncates the file without calling the engine.
    /// Otherwise the existing file is first copied to `<path>.bak`, then
    /// the new ciphertext replaces it via a temp file and rename.
    pub fn save(&self, passphrase: &str) -> Result<()> {
        let Some(plaintext) = self.encode()? else {
            self.ensure_parent_dir()?;
            File::create(&self.path)?;
            tracing::info!(path = %self.path.display(), "vault is empty, file truncated");
            return Ok(());
        };

        let ciphertext = self.engine.encrypt(&plaintext, passphrase, &self.config)?;

        self.ensure_parent_dir()?;
        if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup)
                .map_err(|e| PwVaultError::BackupFailed(self.path.clone(), e))?;
            tracing::debug!(backup = %backup.display(), "previous ciphertext backed up");
        }

        self.write_atomic(&ciphertext)?;
        tracing::info!(
            path = %self.path.display(),
            records = self.records.len(),
            config = %self.config,
            "vault saved"
        );
        Ok(())
    }

    /// Write to a temp file in the same directory, then rename over the
    /// target so readers never see a half-written vault.
    fn write_atomic(&self, bytes: &[u8]) -> Result<()> {
        let parent = self.parent_dir();
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn create_empty_file(&self) -> Result<()> {
        self.ensure_parent_dir()?;
        OpenOptions::new().write(true).create(true).truncate(false).open(&self.path)?;
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        let parent = self.parent_dir();
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The current in-memory records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the store at a different file.  The next `save` writes there
    /// ("save as"); the records in memory are kept.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Path of the single-generation backup (`<path>.bak`).
    pub fn backup_path(&self) -> PathBuf {
        let mut os: OsString = self.path.as_os_str().to_owned();
        os.push(BACKUP_SUFFIX);
        PathBuf::from(os)
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CipherConfig) {
        self.config = config;
    }

    pub fn set_algorithm(&mut self, algorithm: CipherAlgorithm) {
        self.config.algorithm = algorithm;
    }

    pub fn set_digest(&mut self, digest: DigestAlgorithm) {
        self.config.digest = digest;
    }

    pub fn set_compression(&mut self, compression: CompressionAlgorithm) {
        self.config.compression = compression;
    }

    /// The delimiter this store writes.
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
