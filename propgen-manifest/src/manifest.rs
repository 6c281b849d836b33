use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use propgen_core::{
    Charset, Format, PropertySet, normalize_prefix, resolve_output_target, toml_value_to_string,
    volatile_key,
};
use serde::Deserialize;

use crate::{Error, Result, validate::ParseContext};

/// Root manifest for propgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output settings
    pub generator: GeneratorConfig,

    /// Static properties merged under any computed ones
    #[serde(default)]
    pub properties: toml::Table,
}

/// The `[generator]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Unit name shown in status lines
    pub project: String,

    #[serde(default)]
    pub format: Format,

    /// Namespace of the build timestamp key
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Output filename, relative to `output` unless absolute
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Base directory for relative filenames
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub charset: Charset,
}

fn default_prefix() -> String {
    "git".to_string()
}

fn default_filename() -> String {
    "git.properties".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

impl GeneratorConfig {
    /// Prefix normalized to end with a dot, or empty.
    pub fn prefix_dot(&self) -> String {
        normalize_prefix(&self.prefix)
    }

    /// Key of the build timestamp property.
    pub fn volatile_key(&self) -> String {
        volatile_key(&self.prefix)
    }

    /// Where the generated file lands, relative to `root` when `output` is relative.
    pub fn output_target(&self, root: &Path) -> PathBuf {
        resolve_output_target(&root.join(&self.output), &self.filename)
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, crate::MANIFEST_FILENAME)
    }
}

impl Manifest {
    /// Parse a propgen.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a propgen.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.validate(content, filename)?;
        Ok(manifest)
    }

    /// Static properties as strings, in key order.
    pub fn property_set(&self) -> PropertySet {
        self.properties
            .iter()
            .filter_map(|(key, value)| toml_value_to_string(value).map(|v| (key.as_str(), v)))
            .collect()
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        let ctx = ParseContext::new(src, filename);

        ctx.require_non_empty("project", &self.generator.project)?;
        ctx.require_non_empty("filename", &self.generator.filename)?;

        for (key, value) in &self.properties {
            ctx.require_scalar(key, value)?;
        }
        Ok(())
    }
}
