use std::path::{Path, PathBuf};

/// Suffix of the build timestamp property, appended to the namespace prefix.
pub const BUILD_TIME: &str = "build.time";

/// Resolve where a generated file lands.
///
/// `filename` is joined onto `base` unless it is absolute, in which case
/// `base` is ignored entirely. No filesystem access happens here.
pub fn resolve_output_target(base: &Path, filename: impl AsRef<Path>) -> PathBuf {
    let filename = filename.as_ref();
    if filename.is_absolute() {
        return filename.to_path_buf();
    }
    base.join(filename)
}

/// Normalize a namespace prefix so it is either empty or ends with a dot.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('.') {
        prefix.to_string()
    } else {
        format!("{}.", prefix)
    }
}

/// Key of the build timestamp property under `prefix`.
pub fn volatile_key(prefix: &str) -> String {
    format!("{}{}", normalize_prefix(prefix), BUILD_TIME)
}
