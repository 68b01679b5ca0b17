use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::{Argon2Params, ScryptParams};
use crate::errors::{KeyStretcherError, Result};
use crate::stretch::{StretchConfig, DEFAULT_SALT_SEED};

/// Project-level configuration, loaded from `.key-stretcher.toml`.
///
/// Every field has a default matching the built-in parameters, so the tool
/// works without any config file at all.  Command-line flags override
/// whatever is set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Salt seed, hashed with SHA-256 before use.
    #[serde(default = "default_salt")]
    pub salt: String,

    /// scrypt CPU/memory cost N (power of two).
    #[serde(default = "default_scrypt_cost")]
    pub scrypt_cost: u64,

    /// scrypt block size r.
    #[serde(default = "default_scrypt_block_size")]
    pub scrypt_block_size: u32,

    /// scrypt parallelization p.
    #[serde(default = "default_one")]
    pub scrypt_parallelism: u32,

    /// Worker threads; does not change the derived key.
    #[serde(default = "default_one")]
    pub scrypt_threads: u32,

    /// Argon2 memory size in KiB.
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count.
    #[serde(default = "default_one")]
    pub argon2_iterations: u32,

    /// Argon2 degree of parallelism.
    #[serde(default = "default_one")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_salt() -> String {
    DEFAULT_SALT_SEED.to_string()
}

fn default_scrypt_cost() -> u64 {
    ScryptParams::default().cost
}

fn default_scrypt_block_size() -> u32 {
    ScryptParams::default().block_size
}

fn default_argon2_memory_kib() -> u32 {
    Argon2Params::default().memory_kib
}

fn default_one() -> u32 {
    1
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            salt: default_salt(),
            scrypt_cost: default_scrypt_cost(),
            scrypt_block_size: default_scrypt_block_size(),
            scrypt_parallelism: default_one(),
            scrypt_threads: default_one(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_one(),
            argon2_parallelism: default_one(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".key-stretcher.toml";

    /// Load settings from `<dir>/.key-stretcher.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    /// Load settings from an explicit file, which must exist.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            KeyStretcherError::ConfigError(format!(
                "Failed to read {}: {e}",
                config_path.display()
            ))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeyStretcherError::ConfigError(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })?;

        Ok(settings)
    }

    /// Convert into the typed pipeline configuration.
    pub fn stretch_config(&self) -> StretchConfig {
        StretchConfig {
            salt_seed: self.salt.clone(),
            scrypt: ScryptParams {
                cost: self.scrypt_cost,
                block_size: self.scrypt_block_size,
                parallelism: self.scrypt_parallelism,
                threads: self.scrypt_threads,
            },
            argon2: Argon2Params {
                memory_kib: self.argon2_memory_kib,
                iterations: self.argon2_iterations,
                parallelism: self.argon2_parallelism,
            },
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
    fn default_settings_match_pipeline_defaults() {
        assert_eq!(Settings::default().stretch_config(), StretchConfig::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
salt = "pepper"
scrypt_cost = 16384
scrypt_block_size = 4
scrypt_parallelism = 2
scrypt_threads = 4
argon2_memory_kib = 65536
argon2_iterations = 3
argon2_parallelism = 4
"#;
        fs::write(tmp.path().join(".key-stretcher.toml"), config).unwrap();

        let config = Settings::load(tmp.path()).unwrap().stretch_config();
        assert_eq!(config.salt_seed, "pepper");
        assert_eq!(
            config.scrypt,
            ScryptParams {
                cost: 16_384,
                block_size: 4,
                parallelism: 2,
                threads: 4,
            }
        );
        assert_eq!(
            config.argon2,
            Argon2Params {
                memory_kib: 65_536,
                iterations: 3,
                parallelism: 4,
            }
        );
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".key-stretcher.toml"), "scrypt_cost = 2048\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.scrypt_cost, 2048);
        // Rest should be defaults
        assert_eq!(settings.salt, "somesalt");
        assert_eq!(settings.scrypt_block_size, 8);
        assert_eq!(settings.argon2_memory_kib, 1024);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".key-stretcher.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(KeyStretcherError::ConfigError(_))));
    }

    #[test]
    fn load_file_errors_when_missing() {
        let tmp = TempDir::new().unwrap();
        let result = Settings::load_file(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(KeyStretcherError::ConfigError(_))));
    }
}
