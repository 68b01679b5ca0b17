//! scrypt key derivation.
//!
//! Thin wrapper around the RustCrypto `scrypt` crate: validates the cost
//! parameters, converts the CPU/memory cost `N` into the `log2(N)` form the
//! crate expects and writes the raw 32-byte output straight into a
//! [`DerivedKey`].

use tracing::debug;

use super::keys::{DerivedKey, KEY_LEN};
use super::salt::DerivedSalt;
use crate::errors::{KeyStretcherError, Result};

/// scrypt cost parameters.
///
/// `cost`, `block_size` and `parallelism` change the derived key.
/// `threads` only bounds how many worker threads the pipeline may use and
/// never changes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost `N` (must be a power of two, default: 1024).
    pub cost: u64,
    /// Block size `r` (default: 8).
    pub block_size: u32,
    /// Parallelization `p` (default: 1).
    pub parallelism: u32,
    /// Execution thread count (default: 1).
    pub threads: u32,
}

/// Largest working memory accepted for one scrypt run (64 GiB).
///
/// The `scrypt` crate aborts the process when its scratch allocation fails,
/// so oversized requests are refused up front.
pub const MAX_MEMORY_BYTES: u128 = 64 << 30;

/// `r * p` must stay below `2^30` (RFC 7914 §2).
const MAX_BLOCK_LANES: u64 = 1 << 30;

impl Default for ScryptParams {
    fn default() -> Self {
        Self {
            cost: 1024,
            block_size: 8,
            parallelism: 1,
            threads: 1,
        }
    }
}

impl ScryptParams {
    /// Check every field against scrypt's preconditions.
    ///
    /// Besides the per-field minimums this enforces the combined limits the
    /// `scrypt` crate applies (`N < 2^(16 r)`, `r * p < 2^30`) and the
    /// [`MAX_MEMORY_BYTES`] ceiling, so each failure names the parameter to
    /// change and nothing is allocated for an impossible request.
    pub fn validate(&self) -> Result<()> {
        if self.cost == 0 || !self.cost.is_power_of_two() {
            return Err(KeyStretcherError::parameter(
                "scrypt CPU/memory cost",
                format!("must be a positive power of two (got {})", self.cost),
            ));
        }
        if self.block_size < 1 {
            return Err(KeyStretcherError::parameter(
                "scrypt block size",
                "must be at least 1",
            ));
        }
        if self.parallelism < 1 {
            return Err(KeyStretcherError::parameter(
                "scrypt parallelization",
                "must be at least 1",
            ));
        }
        if self.threads < 1 {
            return Err(KeyStretcherError::parameter(
                "scrypt threads",
                "must be at least 1",
            ));
        }
        if u64::from(self.log_n()) >= 16 * u64::from(self.block_size) {
            return Err(KeyStretcherError::parameter(
                "scrypt CPU/memory cost",
                format!(
                    "N={} is too large for block size r={} (need N < 2^(16 r))",
                    self.cost, self.block_size
                ),
            ));
        }
        if u64::from(self.block_size) * u64::from(self.parallelism) >= MAX_BLOCK_LANES {
            return Err(KeyStretcherError::parameter(
                "scrypt parallelization",
                format!(
                    "p={} is too large for block size r={} (need r * p < 2^30)",
                    self.parallelism, self.block_size
                ),
            ));
        }
        if self.memory_bytes() > MAX_MEMORY_BYTES {
            return Err(KeyStretcherError::parameter(
                "scrypt CPU/memory cost",
                format!(
                    "N={} r={} p={} needs {} bytes, more than the {MAX_MEMORY_BYTES} byte limit",
                    self.cost,
                    self.block_size,
                    self.parallelism,
                    self.memory_bytes()
                ),
            ));
        }
        Ok(())
    }

    /// `log2(N)`; only meaningful once [`validate`](Self::validate) passed.
    pub fn log_n(&self) -> u8 {
        self.cost.trailing_zeros() as u8
    }

    /// Working memory in bytes: the `128 * r * N` scratch area plus the
    /// `128 * r * p` lane buffer.
    pub fn memory_bytes(&self) -> u128 {
        128 * u128::from(self.block_size) * (u128::from(self.cost) + u128::from(self.parallelism))
    }

    fn to_crate_params(self) -> Result<scrypt::Params> {
        self.validate()?;
        scrypt::Params::new(self.log_n(), self.block_size, self.parallelism, KEY_LEN).map_err(
            |e| {
                KeyStretcherError::parameter(
                    "scrypt parameters",
                    format!(
                        "N={} r={} p={} rejected by scrypt: {e}",
                        self.cost, self.block_size, self.parallelism
                    ),
                )
            },
        )
    }
}

/// Derive a 32-byte key from `password` and `salt` with scrypt.
///
/// The same password + salt + params always produce the same key,
/// whatever `params.threads` is set to.
pub fn run_scrypt(password: &[u8], salt: &DerivedSalt, params: &ScryptParams) -> Result<DerivedKey> {
    let crate_params = params.to_crate_params()?;

    debug!(
        n = params.cost,
        r = params.block_size,
        p = params.parallelism,
        memory_bytes = %params.memory_bytes(),
        "running scrypt"
    );

    let mut key = [0u8; KEY_LEN];
    scrypt::scrypt(password, salt.as_bytes(), &crate_params, &mut key)
        .map_err(|e| KeyStretcherError::KeyDerivationFailed(format!("scrypt failed: {e}")))?;

    Ok(DerivedKey::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::salt::derive_salt;

    fn fast() -> ScryptParams {
        ScryptParams {
            cost: 16,
            block_size: 1,
            parallelism: 1,
            threads: 1,
        }
    }

    #[test]
    fn defaults_match_reference_tool() {
        let p = ScryptParams::default();
        assert_eq!(p.cost, 1024);
        assert_eq!(p.block_size, 8);
        assert_eq!(p.parallelism, 1);
        assert_eq!(p.threads, 1);
        assert_eq!(p.log_n(), 10);
        assert_eq!(p.memory_bytes(), 128 * 8 * (1024 + 1));
    }

    #[test]
    fn rejects_non_power_of_two_cost() {
        let params = ScryptParams { cost: 3, ..fast() };
        let err = run_scrypt(b"pw", &derive_salt("s"), &params).unwrap_err();
        match err {
            KeyStretcherError::Parameter { name, .. } => assert_eq!(name, "scrypt CPU/memory cost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_zero_values() {
        let cases = [
            (ScryptParams { cost: 0, ..fast() }, "scrypt CPU/memory cost"),
            (ScryptParams { block_size: 0, ..fast() }, "scrypt block size"),
            (ScryptParams { parallelism: 0, ..fast() }, "scrypt parallelization"),
            (ScryptParams { threads: 0, ..fast() }, "scrypt threads"),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(KeyStretcherError::Parameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected parameter error for {expected}, got {other:?}"),
            }
        }
    }

    fn rejected_name(params: ScryptParams) -> &'static str {
        match params.validate() {
            Err(KeyStretcherError::Parameter { name, .. }) => name,
            other => panic!("expected parameter error for {params:?}, got {other:?}"),
        }
    }

    #[test]
    fn rejects_cost_too_large_for_block_size() {
        // scrypt requires N < 2^(16 r); with r = 1 that caps log2(N) at 15.
        let params = ScryptParams {
            cost: 1 << 16,
            ..fast()
        };
        assert_eq!(rejected_name(params), "scrypt CPU/memory cost");
        let err = run_scrypt(b"pw", &derive_salt("s"), &params).unwrap_err();
        assert!(matches!(
            err,
            KeyStretcherError::Parameter { name: "scrypt CPU/memory cost", .. }
        ));
        assert!(ScryptParams { cost: 1 << 15, ..fast() }.validate().is_ok());
    }

    #[test]
    fn rejects_parallelism_too_large_for_block_size() {
        let params = ScryptParams {
            cost: 16,
            block_size: 8,
            parallelism: 1 << 28,
            threads: 1,
        };
        assert_eq!(rejected_name(params), "scrypt parallelization");
    }

    #[test]
    fn rejects_cost_beyond_memory_ceiling() {
        // 128 * 8 * 2^45 bytes is far more than any machine can allocate.
        let huge = ScryptParams {
            cost: 1 << 45,
            block_size: 8,
            parallelism: 1,
            threads: 1,
        };
        assert_eq!(rejected_name(huge), "scrypt CPU/memory cost");
        let err = run_scrypt(b"pw", &derive_salt("s"), &huge).unwrap_err();
        assert!(err.to_string().contains("byte limit"));

        // N = 2^26 needs 64 GiB plus the lane buffer, just over the limit.
        let over = ScryptParams { cost: 1 << 26, ..huge };
        assert_eq!(rejected_name(over), "scrypt CPU/memory cost");
        let below = ScryptParams { cost: 1 << 25, ..huge };
        assert!(below.validate().is_ok());
    }

    #[test]
    fn output_is_deterministic() {
        let salt = derive_salt("salt");
        let k1 = run_scrypt(b"password", &salt, &fast()).unwrap();
        let k2 = run_scrypt(b"password", &salt, &fast()).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn threads_do_not_affect_output() {
        let salt = derive_salt("salt");
        let one = run_scrypt(b"password", &salt, &fast()).unwrap();
        let many = run_scrypt(b"password", &salt, &ScryptParams { threads: 8, ..fast() }).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn cost_parameters_affect_output() {
        let salt = derive_salt("salt");
        let base = run_scrypt(b"password", &salt, &fast()).unwrap();
        let bigger_n = run_scrypt(b"password", &salt, &ScryptParams { cost: 32, ..fast() }).unwrap();
        let bigger_r =
            run_scrypt(b"password", &salt, &ScryptParams { block_size: 2, ..fast() }).unwrap();
        let bigger_p =
            run_scrypt(b"password", &salt, &ScryptParams { parallelism: 2, ..fast() }).unwrap();
        assert_ne!(base, bigger_n);
        assert_ne!(base, bigger_r);
        assert_ne!(base, bigger_p);
    }
}
