use std::path::PathBuf;

use miette::Diagnostic;
use propgen_codec::CodecError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Fatal failure while writing a properties file.
///
/// These are never retried: a second attempt at the same filesystem
/// operation in the same process is not expected to behave differently.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("cannot create parent directories for '{path}'")]
    #[diagnostic(
        code(propgen::create_directories),
        help("check that no parent of the output path is an existing file")
    )]
    CreateDirectories {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize properties for '{path}'")]
    #[diagnostic(code(propgen::serialize))]
    Serialize {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("cannot create properties file '{path}'")]
    #[diagnostic(
        code(propgen::write),
        help("check permissions and free space on the output directory")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Path of the file that could not be generated.
    pub fn path(&self) -> &std::path::Path {
        match self {
            GenerateError::CreateDirectories { path, .. }
            | GenerateError::Serialize { path, .. }
            | GenerateError::Write { path, .. } => path,
        }
    }
}

/// Why an existing file could not be used for comparison.
///
/// Always recovered from by regenerating; never returned to callers.
#[derive(Debug, Error)]
pub(crate) enum ReadFailure {
    #[error("cannot open existing file")]
    Io(#[from] std::io::Error),

    #[error("cannot parse existing file")]
    Decode(#[from] CodecError),
}
