//! Configuration loaded from `.key-stretcher.toml`.

pub mod settings;

pub use settings::Settings;
