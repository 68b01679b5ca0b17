//! Salt derivation.
//!
//! The caller supplies an arbitrary salt *seed* string.  Both KDFs need the
//! exact same binary salt, so the seed is hashed once with SHA-256 and the
//! resulting 32 bytes are shared read-only by the scrypt and Argon2d runners.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Length of the derived salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Fixed-length binary salt computed from a salt seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedSalt([u8; SALT_LEN]);

impl DerivedSalt {
    /// Access the raw salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    /// Standard base64 rendering, for display only.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }
}

/// Hash the UTF-8 bytes of `seed` into a 32-byte salt.
///
/// Any string is accepted, including the empty string.
pub fn derive_salt(seed: &str) -> DerivedSalt {
    DerivedSalt(Sha256::digest(seed.as_bytes()).into())
}
