//! Command implementations, one module per invocation mode.

pub mod completions;
pub mod derive;
