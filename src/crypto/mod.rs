//! Cryptographic building blocks for key-stretcher.
//!
//! This module provides:
//! - SHA-256 salt derivation from a salt seed (`salt`)
//! - scrypt key derivation (`scrypt_kdf`)
//! - Argon2d key derivation (`argon2_kdf`)
//! - XOR combination of the two derived keys (`combine`)
//! - Zeroizing key wrappers (`keys`)

pub mod argon2_kdf;
pub mod combine;
pub mod keys;
pub mod salt;
pub mod scrypt_kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_salt, run_scrypt, run_argon2d, combine, ...};
pub use argon2_kdf::{run_argon2d, Argon2Params};
pub use combine::combine;
pub use keys::{DerivedKey, FinalKey, KEY_LEN};
pub use salt::{derive_salt, DerivedSalt, SALT_LEN};
pub use scrypt_kdf::{run_scrypt, ScryptParams};
