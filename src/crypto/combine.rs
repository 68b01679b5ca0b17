//! XOR combination of the two derived keys.
//!
//! Works on raw key bytes only.  As long as either input stays
//! unpredictable, so does the output.

use super::keys::FinalKey;
use crate::errors::{KeyStretcherError, Result};

/// Byte-wise XOR of `a` and `b`.
///
/// Fails with [`KeyStretcherError::LengthMismatch`] if the inputs differ in
/// length; nothing is truncated or padded.
pub fn combine(a: &[u8], b: &[u8]) -> Result<FinalKey> {
    if a.len() != b.len() {
        return Err(KeyStretcherError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(FinalKey::new(
        a.iter().zip(b).map(|(x, y)| x ^ y).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_xor_ones_is_ones() {
        let key = combine(&[0x00; 32], &[0xFF; 32]).unwrap();
        assert_eq!(key.as_bytes(), &[0xFF; 32]);
    }

    #[test]
    fn value_xor_itself_is_zero() {
        let a: Vec<u8> = (0..32).map(|i| i * 7 + 3).collect();
        let key = combine(&a, &a).unwrap();
        assert_eq!(key.as_bytes(), &[0x00; 32]);
    }

    #[test]
    fn is_commutative() {
        let a = [0x5Au8; 32];
        let b: Vec<u8> = (0..32).collect();
        assert_eq!(combine(&a, &b).unwrap(), combine(&b, &a).unwrap());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = combine(&[0u8; 32], &[0u8; 31]).unwrap_err();
        match err {
            KeyStretcherError::LengthMismatch { left, right } => {
                assert_eq!((left, right), (32, 31));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_inputs_give_empty_key() {
        let key = combine(&[], &[]).unwrap();
        assert!(key.is_empty());
    }
}
