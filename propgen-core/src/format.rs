//! Serialization formats for generated files.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// On-disk format of a generated properties file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    /// Line-oriented `key=value` text with `\uXXXX` escapes
    #[default]
    TextProperties,
    /// Pretty-printed flat JSON object
    Json,
}

impl Format {
    /// Returns the format identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::TextProperties => "properties",
            Format::Json => "json",
        }
    }

    /// Conventional file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "properties" | "props" | "text" => Ok(Format::TextProperties),
            "json" => Ok(Format::Json),
            _ => Err(format!(
                "unknown format '{}', expected 'properties' or 'json'",
                s
            )),
        }
    }
}

impl TryFrom<String> for Format {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.as_str().to_string()
    }
}
