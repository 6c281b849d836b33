//! Validation helpers that point diagnostics at the offending TOML key.

use miette::SourceSpan;

use crate::{Error, Result};

/// Parsing and validation context that carries source information.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseContext<'a> {
    /// The raw TOML source content
    src: &'a str,
    /// The filename for error reporting
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    /// Find the span of a key in the source.
    pub fn find_span(&self, key: &str) -> Option<SourceSpan> {
        find_key_span(self.src, key)
    }

    /// Fail when a required string setting is blank.
    pub fn require_non_empty(&self, key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::validation(
                format!("'{}' cannot be empty", key),
                self.src,
                self.filename,
                self.find_span(key),
            ));
        }
        Ok(())
    }

    /// Fail when a `[properties]` value has no string form.
    pub fn require_scalar(&self, key: &str, value: &toml::Value) -> Result<()> {
        let found = match value {
            toml::Value::Array(_) => "an array",
            toml::Value::Table(_) => "a table",
            _ => return Ok(()),
        };
        Err(Error::invalid_property(
            key,
            found,
            self.src,
            self.filename,
            self.find_span(key),
        ))
    }
}

/// Find the span of a key in the TOML source
///
/// Matches `key =`, `"key" =` and `'key' =` at the start of a line, and
/// table headers ending in `.key]`.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let candidates = [
        key.to_string(),
        format!("\"{}\"", key),
        format!("'{}'", key),
    ];

    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        for candidate in &candidates {
            let assigned = trimmed
                .strip_prefix(candidate.as_str())
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            if assigned {
                return Some(SourceSpan::from((offset + indent, candidate.len())));
            }
        }

        if trimmed.starts_with('[') {
            if let Some(pos) = trimmed.find(&format!(".{}]", key)) {
                return Some(SourceSpan::from((offset + indent + pos + 1, key.len())));
            }
        }

        offset += line.len();
    }

    None
}
