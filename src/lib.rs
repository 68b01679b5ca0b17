pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod stretch;

pub use errors::{KeyStretcherError, Result};
pub use stretch::{stretch, StretchConfig, StretchReport};
