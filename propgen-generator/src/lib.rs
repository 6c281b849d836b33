//! Regenerate-if-changed writer for build metadata properties files.
//!
//! [`Generator::maybe_generate`] compares the caller's properties against the
//! file already on disk, ignoring the build timestamp, and only rewrites the
//! file when something else changed. Skipping the write keeps downstream
//! incremental builds from seeing a fresh modification time.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod generator;
mod notifier;

pub use error::{GenerateError, Result};
pub use generator::{CheckOutcome, GenerateOutcome, Generator};
pub use notifier::{BuildNotifier, NoopNotifier};
