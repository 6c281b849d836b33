//! Core types for the propgen properties file generator.
//!
//! This crate provides the property set, format and charset types, and the
//! filesystem helpers shared by the codec and generator crates.

mod charset;
mod file;
mod format;
mod properties;
mod target;
mod utils;

pub use charset::{Charset, CharsetError};
// File operations
pub use file::{create_parent_dirs, write_bytes};
pub use format::Format;
pub use properties::{PropertySet, SortedProperties};
pub use target::{BUILD_TIME, normalize_prefix, resolve_output_target, volatile_key};
// Value stringification
pub use utils::{json_value_to_string, toml_value_to_string};
