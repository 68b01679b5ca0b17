//! Key material produced by the KDF runners and the combiner.
//!
//! Both wrappers zero their memory when dropped so derived keys do not
//! linger after the report has been printed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of every derived key and of the final key (256 bits).
pub const KEY_LEN: usize = 32;

/// Raw output of a single KDF runner.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to feed the combiner).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Standard base64 rendering, for display only.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes)
    }
}

/// The deliverable: byte-wise XOR of the scrypt and Argon2d keys.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct FinalKey {
    bytes: Vec<u8>,
}

impl FinalKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Standard base64 rendering, for display only.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

// Keep key bytes out of `{:?}` output.
impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

impl std::fmt::Debug for FinalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FinalKey({} bytes)", self.bytes.len())
    }
}
