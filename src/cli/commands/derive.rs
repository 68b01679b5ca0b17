//! `key-stretcher` (no subcommand) — stretch a password into the final key.

use crate::cli::{output, read_password, Cli};
use crate::crypto::derive_salt;
use crate::errors::{KeyStretcherError, Result};
use crate::stretch::stretch;

/// Execute the default derivation command.
pub fn execute(cli: &Cli) -> Result<()> {
    // 1. Resolve parameters: flags > config file > defaults.
    let config = cli.settings()?.stretch_config();

    // 2. Reject bad parameters before asking for a password.
    config.scrypt.validate()?;
    config.argon2.validate()?;

    if config.scrypt.threads > 2 {
        output::warning(&format!(
            "scrypt threads = {}: at most 2 worker threads are used (one per KDF)",
            config.scrypt.threads
        ));
    }

    // 3. Show what is about to be computed.
    let verbose_report = !cli.quiet && !cli.json;
    if verbose_report {
        output::print_parameters(&config, &derive_salt(&config.salt_seed));
        println!();
    }

    // 4. Read the password and run both KDFs.
    let password = read_password()?;
    let report = stretch(password.as_bytes(), &config)?;

    // 5. Report.
    if cli.json {
        let json = output::report_json(&config, &report)
            .map_err(|e| KeyStretcherError::CommandFailed(format!("JSON output: {e}")))?;
        println!("{json}");
    } else if cli.quiet {
        println!("{}", report.final_key.to_base64());
    } else {
        output::print_report(&report);
    }

    Ok(())
}
