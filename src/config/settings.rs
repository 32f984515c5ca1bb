use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::{Argon2Params, CipherAlgorithm, CipherConfig, CompressionAlgorithm, DigestAlgorithm};
use crate::errors::{PwVaultError, Result};

/// Project-level configuration, loaded from `.pwvault.toml`.
///
/// Every field has a sensible default so PwVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when `--file` is not given.
    #[serde(default = "default_file")]
    pub default_file: String,

    #[serde(default)]
    pub algorithm: CipherAlgorithm,

    #[serde(default)]
    pub digest: DigestAlgorithm,

    #[serde(default)]
    pub compression: CompressionAlgorithm,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_file() -> String {
    "passwords".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            algorithm: CipherAlgorithm::default(),
            digest: DigestAlgorithm::default(),
            compression: CompressionAlgorithm::default(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".pwvault.toml";

    /// Load settings from `<project_dir>/.pwvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Resolve the default vault file relative to `project_dir`.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.default_file)
    }

    /// The cipher choices for new saves.
    pub fn cipher_config(&self) -> CipherConfig {
        CipherConfig::new(self.algorithm, self.digest, self.compression)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.default_file, "passwords");
        assert_eq!(s.cipher_config(), CipherConfig::default());
        assert_eq!(s.argon2_params(), Argon2Params::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.default_file, "passwords");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
default_file = "vault.pw"
algorithm = "chacha20-poly1305"
digest = "SHA256"
compression = "uncompressed"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
"#;
        fs::write(tmp.path().join(".pwvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.default_file, "vault.pw");
        assert_eq!(settings.algorithm, CipherAlgorithm::ChaCha20Poly1305);
        assert_eq!(settings.digest, DigestAlgorithm::Sha256);
        assert_eq!(settings.compression, CompressionAlgorithm::Uncompressed);
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwvault.toml"), "digest = \"sha256\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.digest, DigestAlgorithm::Sha256);
        assert_eq!(settings.algorithm, CipherAlgorithm::Aes256Gcm);
        assert_eq!(settings.argon2_iterations, 3);
    }

    #[test]
    fn load_errors_on_unknown_algorithm() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwvault.toml"), "algorithm = \"TWOFISH\"\n").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PwVaultError::ConfigError(_))));
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwvault.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn vault_path_joins_default_file() {
        let s = Settings::default();
        let project = Path::new("/home/user");
        assert_eq!(s.vault_path(project), PathBuf::from("/home/user/passwords"));
    }
}
