// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod manifest;
mod validate;

pub use error::{Error, Result};
pub use file::ManifestFile;
pub use manifest::{GeneratorConfig, Manifest};

/// Default manifest filename looked up by the CLI.
pub const MANIFEST_FILENAME: &str = "propgen.toml";
