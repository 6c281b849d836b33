use propgen_core::CharsetError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Charset(#[from] CharsetError),

    #[error("invalid JSON properties")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}
