//! Property inputs given on the command line.

use std::{path::Path, str::FromStr};

use eyre::{Context, Result};
use propgen_codec::codec_for;
use propgen_core::{Charset, Format, PropertySet};

/// A `KEY=VALUE` pair from `--set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyValue {
    pub key: String,
    pub value: String,
}

impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, _)) if key.trim().is_empty() => {
                Err(format!("missing key in '{}', expected KEY=VALUE", s))
            }
            Some((key, value)) => Ok(Self {
                key: key.trim().to_string(),
                value: value.to_string(),
            }),
            None => Err(format!("missing '=' in '{}', expected KEY=VALUE", s)),
        }
    }
}

/// Format of an input file, guessed from its extension.
fn input_format(path: &Path) -> Format {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
        _ => Format::TextProperties,
    }
}

/// Read properties computed by an upstream step.
pub(crate) fn read_properties_file(path: &Path, charset: Charset) -> Result<PropertySet> {
    let bytes =
        std::fs::read(path).wrap_err_with(|| format!("Failed to read '{}'", path.display()))?;
    codec_for(input_format(path))
        .deserialize(&bytes, charset)
        .wrap_err_with(|| format!("Failed to parse properties from '{}'", path.display()))
}
