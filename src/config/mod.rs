// src/config/mod.rs
//! Configuration system for passvault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, GeneratorSettings, KdfSettings, StorageSettings};

mod app;
mod defaults;
