use std::{
    fs,
    path::{Path, PathBuf},
};

use propgen_codec::{Codec, codec_for};
use propgen_core::{
    Charset, Format, PropertySet, create_parent_dirs, normalize_prefix, resolve_output_target,
    volatile_key, write_bytes,
};
use tracing::{debug, info};

use crate::{BuildNotifier, GenerateError, NoopNotifier, Result, error::ReadFailure};

/// Result of [`Generator::maybe_generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// Whether the file was rewritten
    pub written: bool,
    /// Resolved output path
    pub path: PathBuf,
}

/// State of the file on disk relative to a property set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Existing file matches, ignoring the build timestamp
    UpToDate,
    /// Existing file differs
    Stale,
    /// No file at the output path
    Missing,
    /// A file exists but cannot be read in the configured format
    Unreadable,
}

impl CheckOutcome {
    pub fn needs_generation(&self) -> bool {
        !matches!(self, CheckOutcome::UpToDate)
    }
}

/// Writes a properties file only when its content would change.
pub struct Generator {
    codec: &'static dyn Codec,
    prefix: String,
    project: String,
    notifier: Box<dyn BuildNotifier>,
}

impl Generator {
    /// Create a generator for `format`.
    ///
    /// `prefix` namespaces the build timestamp key (`git` and `git.` are
    /// equivalent). `project` names the unit in status lines.
    pub fn new(format: Format, prefix: &str, project: impl Into<String>) -> Self {
        Self {
            codec: codec_for(format),
            prefix: normalize_prefix(prefix),
            project: project.into(),
            notifier: Box::new(NoopNotifier),
        }
    }

    /// Notify `notifier` after every write.
    pub fn with_notifier(mut self, notifier: impl BuildNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn format(&self) -> Format {
        self.codec.format()
    }

    /// The build timestamp key excluded from comparison.
    pub fn volatile_key(&self) -> String {
        volatile_key(&self.prefix)
    }

    /// Write `properties` to `filename` under `base` unless the existing file
    /// already holds the same properties.
    ///
    /// An existing file that cannot be read or parsed is overwritten. Only
    /// failures to create directories or write the new file are errors.
    pub fn maybe_generate(
        &self,
        properties: &PropertySet,
        base: &Path,
        filename: impl AsRef<Path>,
        charset: Charset,
    ) -> Result<GenerateOutcome> {
        let path = resolve_output_target(base, filename);

        if self.inspect(properties, &path, charset) == CheckOutcome::UpToDate {
            info!(
                path = %path.display(),
                project = %self.project,
                "Properties file [{}] is up-to-date (for module {})...",
                path.display(),
                self.project
            );
            return Ok(GenerateOutcome {
                written: false,
                path,
            });
        }

        self.write(properties, &path, charset)?;
        self.notifier.refresh(&path);

        Ok(GenerateOutcome {
            written: true,
            path,
        })
    }

    /// Report whether [`maybe_generate`](Self::maybe_generate) would write,
    /// without touching the filesystem beyond reading.
    pub fn check(
        &self,
        properties: &PropertySet,
        base: &Path,
        filename: impl AsRef<Path>,
        charset: Charset,
    ) -> (PathBuf, CheckOutcome) {
        let path = resolve_output_target(base, filename);
        let outcome = self.inspect(properties, &path, charset);
        (path, outcome)
    }

    fn inspect(&self, properties: &PropertySet, path: &Path, charset: Charset) -> CheckOutcome {
        if !path.exists() {
            return CheckOutcome::Missing;
        }

        info!(
            path = %path.display(),
            project = %self.project,
            "Reading existing {} file [{}] (for module {})...",
            self.label(),
            path.display(),
            self.project
        );

        match self.read(path, charset) {
            Ok(persisted) if self.same_ignoring_volatile(properties, &persisted) => {
                CheckOutcome::UpToDate
            }
            Ok(_) => CheckOutcome::Stale,
            Err(failure) => {
                info!(
                    path = %path.display(),
                    project = %self.project,
                    "Cannot read {} file [{}] (for module {})...",
                    self.label(),
                    path.display(),
                    self.project
                );
                debug!(error = ?failure, "existing file will be regenerated");
                CheckOutcome::Unreadable
            }
        }
    }

    fn read(&self, path: &Path, charset: Charset) -> std::result::Result<PropertySet, ReadFailure> {
        let bytes = fs::read(path)?;
        Ok(self.codec.deserialize(&bytes, charset)?)
    }

    /// Compare owned copies with the build timestamp removed from both.
    fn same_ignoring_volatile(&self, local: &PropertySet, persisted: &PropertySet) -> bool {
        let key = self.volatile_key();
        let mut local = local.clone();
        let mut persisted = persisted.clone();
        local.remove(&key);
        persisted.remove(&key);
        local == persisted
    }

    fn write(&self, properties: &PropertySet, path: &Path, charset: Charset) -> Result<()> {
        create_parent_dirs(path).map_err(|source| GenerateError::CreateDirectories {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            project = %self.project,
            "Writing {} file to [{}] (for module {})...",
            self.label(),
            path.display(),
            self.project
        );

        let bytes = self
            .codec
            .serialize(&properties.sorted(), charset)
            .map_err(|source| GenerateError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;

        write_bytes(path, &bytes).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn label(&self) -> &'static str {
        self.codec.format().as_str()
    }
}
