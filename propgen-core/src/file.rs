use std::{fs, io, path::Path};

/// Create every missing parent directory of `path`.
///
/// Succeeds without touching the filesystem when the parents already exist
/// or when `path` has no parent component.
pub fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write `bytes` to `path`, truncating any existing file.
///
/// This is a direct stream write: a crash mid-write can leave a truncated file.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}
