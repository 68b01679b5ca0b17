//! The dual-KDF pipeline: salt → scrypt + Argon2d → XOR.
//!
//! [`stretch`] is the library's entry point.  It takes a typed
//! [`StretchConfig`] and a password, and returns a [`StretchReport`] holding
//! every intermediate value the CLI displays.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::crypto::{
    combine, derive_salt, run_argon2d, run_scrypt, Argon2Params, DerivedKey, DerivedSalt,
    FinalKey, ScryptParams,
};
use crate::errors::{KeyStretcherError, Result};

/// Salt seed used when none is configured.
pub const DEFAULT_SALT_SEED: &str = "somesalt";

/// Everything that determines the final key, except the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StretchConfig {
    pub salt_seed: String,
    pub scrypt: ScryptParams,
    pub argon2: Argon2Params,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            salt_seed: DEFAULT_SALT_SEED.to_string(),
            scrypt: ScryptParams::default(),
            argon2: Argon2Params::default(),
        }
    }
}

/// Output of one successful run.
#[derive(Debug)]
pub struct StretchReport {
    pub salt: DerivedSalt,
    pub scrypt_key: DerivedKey,
    pub scrypt_elapsed: Duration,
    pub argon2_key: DerivedKey,
    pub argon2_elapsed: Duration,
    pub final_key: FinalKey,
}

/// Derive the final key for `password` under `config`.
///
/// Both parameter sets are validated before any memory-hard work starts.
/// With `config.scrypt.threads >= 2` the two KDFs run on separate threads;
/// the result is identical either way.
pub fn stretch(password: &[u8], config: &StretchConfig) -> Result<StretchReport> {
    if password.is_empty() {
        return Err(KeyStretcherError::EmptyPassword);
    }
    config.scrypt.validate()?;
    config.argon2.validate()?;

    let salt = derive_salt(&config.salt_seed);
    debug!(salt = %salt.to_base64(), "derived salt");

    let ((scrypt_key, scrypt_elapsed), (argon2_key, argon2_elapsed)) =
        if config.scrypt.threads >= 2 {
            debug!(threads = config.scrypt.threads, "running KDFs concurrently");
            run_concurrently(password, &salt, config)?
        } else {
            debug!("running KDFs sequentially");
            (
                timed(|| run_scrypt(password, &salt, &config.scrypt))?,
                timed(|| run_argon2d(password, &salt, &config.argon2))?,
            )
        };

    debug!(elapsed_ms = scrypt_elapsed.as_millis() as u64, "scrypt finished");
    debug!(elapsed_ms = argon2_elapsed.as_millis() as u64, "argon2d finished");

    let final_key = combine(scrypt_key.as_bytes(), argon2_key.as_bytes())?;

    Ok(StretchReport {
        salt,
        scrypt_key,
        scrypt_elapsed,
        argon2_key,
        argon2_elapsed,
        final_key,
    })
}

type Timed = (DerivedKey, Duration);

fn timed(f: impl FnOnce() -> Result<DerivedKey>) -> Result<Timed> {
    let start = Instant::now();
    let key = f()?;
    Ok((key, start.elapsed()))
}

/// Run scrypt and Argon2d on two scoped worker threads.
fn run_concurrently(
    password: &[u8],
    salt: &DerivedSalt,
    config: &StretchConfig,
) -> Result<(Timed, Timed)> {
    run_pair(
        || run_scrypt(password, salt, &config.scrypt),
        || run_argon2d(password, salt, &config.argon2),
    )
}

/// Run both derivations on their own scoped threads and join both.
///
/// Each handle is joined before either result is inspected, so a panic in
/// one worker is reported as [`KeyStretcherError::KeyDerivationFailed`]
/// instead of unwinding out of [`thread::scope`].
fn run_pair<S, A>(scrypt: S, argon2: A) -> Result<(Timed, Timed)>
where
    S: FnOnce() -> Result<DerivedKey> + Send,
    A: FnOnce() -> Result<DerivedKey> + Send,
{
    thread::scope(|scope| {
        let scrypt_worker = scope.spawn(|| timed(scrypt));
        let argon2_worker = scope.spawn(|| timed(argon2));

        let scrypt = joined("scrypt", scrypt_worker.join());
        let argon2 = joined("argon2d", argon2_worker.join());

        Ok((scrypt?, argon2?))
    })
}

fn joined(kdf: &str, outcome: thread::Result<Result<Timed>>) -> Result<Timed> {
    outcome.map_err(|_| {
        KeyStretcherError::KeyDerivationFailed(format!("{kdf} worker thread panicked"))
    })?
}
