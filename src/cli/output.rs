//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::time::Duration;

use comfy_table::{ContentArrangement, Table};
use console::style;
use serde::Serialize;

use crate::crypto::DerivedSalt;
use crate::stretch::{StretchConfig, StretchReport};

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print the effective parameters and the derived salt before hashing.
pub fn print_parameters(config: &StretchConfig, salt: &DerivedSalt) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Parameter", "Value"]);

    let rows = [
        ("scrypt CPU/memory cost", config.scrypt.cost.to_string()),
        ("scrypt block size", config.scrypt.block_size.to_string()),
        ("scrypt parallelization", config.scrypt.parallelism.to_string()),
        ("scrypt threads", config.scrypt.threads.to_string()),
        ("argon2 memory size", config.argon2.memory_kib.to_string()),
        ("argon2 iterations", config.argon2.iterations.to_string()),
        ("argon2 degree of parallelism", config.argon2.parallelism.to_string()),
        ("salt", salt.to_base64()),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }

    println!("{table}");
}

/// Print both stage keys with their timings, then the final key.
pub fn print_report(report: &StretchReport) {
    println!(
        "{} = {} {}",
        style("Scrypt hash").bold(),
        report.scrypt_key.to_base64(),
        style(took(report.scrypt_elapsed)).dim()
    );
    println!(
        "{} = {} {}",
        style("Argon2 hash").bold(),
        report.argon2_key.to_base64(),
        style(took(report.argon2_elapsed)).dim()
    );
    println!(
        "{}  = {}",
        style("Final hash").green().bold(),
        report.final_key.to_base64()
    );
}

fn took(elapsed: Duration) -> String {
    format!("(hashing took {} ms)", elapsed.as_millis())
}

#[derive(Serialize)]
struct JsonStage {
    key: String,
    elapsed_ms: u64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    salt_seed: &'a str,
    salt: String,
    scrypt_cost: u64,
    scrypt_block_size: u32,
    scrypt_parallelism: u32,
    scrypt_threads: u32,
    argon2_memory_kib: u32,
    argon2_iterations: u32,
    argon2_parallelism: u32,
    scrypt: JsonStage,
    argon2: JsonStage,
    final_key: String,
}

/// Render the whole run as pretty-printed JSON.
pub fn report_json(config: &StretchConfig, report: &StretchReport) -> serde_json::Result<String> {
    let json = JsonReport {
        salt_seed: &config.salt_seed,
        salt: report.salt.to_base64(),
        scrypt_cost: config.scrypt.cost,
        scrypt_block_size: config.scrypt.block_size,
        scrypt_parallelism: config.scrypt.parallelism,
        scrypt_threads: config.scrypt.threads,
        argon2_memory_kib: config.argon2.memory_kib,
        argon2_iterations: config.argon2.iterations,
        argon2_parallelism: config.argon2.parallelism,
        scrypt: JsonStage {
            key: report.scrypt_key.to_base64(),
            elapsed_ms: report.scrypt_elapsed.as_millis() as u64,
        },
        argon2: JsonStage {
            key: report.argon2_key.to_base64(),
            elapsed_ms: report.argon2_elapsed.as_millis() as u64,
        },
        final_key: report.final_key.to_base64(),
    };
    serde_json::to_string_pretty(&json)
}
