//! Password-based key derivation using Argon2d.
//!
//! Argon2d (data-dependent memory access) is used on purpose: switching to
//! Argon2i or Argon2id changes the derived key for identical inputs and
//! would break every key derived so far.

use argon2::{Algorithm, Argon2, Params, Version};
use tracing::debug;

use super::keys::{DerivedKey, KEY_LEN};
use super::salt::DerivedSalt;
use crate::errors::{KeyStretcherError, Result};

/// Minimum memory per lane required by Argon2, in KiB.
const MIN_MEMORY_KIB_PER_LANE: u32 = 8;

/// Most lanes Argon2 supports (`2^24 - 1`).
const MAX_PARALLELISM: u32 = 0xFF_FFFF;

/// Largest memory size accepted for one Argon2d run, in KiB (64 GiB).
///
/// Matches the scrypt ceiling; a failed block allocation aborts the process.
pub const MAX_MEMORY_KIB: u32 = 64 << 20;

/// Configurable Argon2d parameters.  All three affect the derived key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory size in KiB (default: 1024 = 1 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 1).
    pub iterations: u32,
    /// Degree of parallelism (default: 1).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }
}

impl Argon2Params {
    /// Enforce Argon2's own limits plus [`MAX_MEMORY_KIB`] so the error
    /// names the bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < 1 {
            return Err(KeyStretcherError::parameter(
                "argon2 iterations",
                "must be at least 1",
            ));
        }
        if self.parallelism < 1 {
            return Err(KeyStretcherError::parameter(
                "argon2 degree of parallelism",
                "must be at least 1",
            ));
        }
        if self.parallelism > MAX_PARALLELISM {
            return Err(KeyStretcherError::parameter(
                "argon2 degree of parallelism",
                format!("must be at most {MAX_PARALLELISM} (got {})", self.parallelism),
            ));
        }
        let min_memory = self.parallelism.saturating_mul(MIN_MEMORY_KIB_PER_LANE);
        if self.memory_kib < min_memory {
            return Err(KeyStretcherError::parameter(
                "argon2 memory size",
                format!(
                    "must be at least 8 KiB per lane ({min_memory} KiB for {} lanes, got {})",
                    self.parallelism, self.memory_kib
                ),
            ));
        }
        if self.memory_kib > MAX_MEMORY_KIB {
            return Err(KeyStretcherError::parameter(
                "argon2 memory size",
                format!(
                    "must be at most {MAX_MEMORY_KIB} KiB (got {})",
                    self.memory_kib
                ),
            ));
        }
        Ok(())
    }
}

/// Derive a 32-byte key with Argon2d (version 0x13).
///
/// The same password + salt + params will always produce the same key.
pub fn run_argon2d(
    password: &[u8],
    salt: &DerivedSalt,
    argon2_params: &Argon2Params,
) -> Result<DerivedKey> {
    argon2_params.validate()?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| KeyStretcherError::parameter("argon2 parameters", e.to_string()))?;

    debug!(
        m = argon2_params.memory_kib,
        t = argon2_params.iterations,
        p = argon2_params.parallelism,
        "running argon2d"
    );

    let argon2 = Argon2::new(Algorithm::Argon2d, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt.as_bytes(), &mut key)
        .map_err(|e| KeyStretcherError::KeyDerivationFailed(format!("Argon2d hashing failed: {e}")))?;

    Ok(DerivedKey::new(key))
}
