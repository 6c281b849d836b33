use std::{fs::OpenOptions, io::Write, path::PathBuf};

use propgen_generator::BuildNotifier;
use tracing::{debug, warn};

/// Appends the path of every rewritten file to a list file.
///
/// Host build systems can watch this file to learn which outputs changed.
pub(crate) struct ChangeListNotifier {
    list: PathBuf,
}

impl ChangeListNotifier {
    pub fn new(list: impl Into<PathBuf>) -> Self {
        Self { list: list.into() }
    }
}

impl BuildNotifier for ChangeListNotifier {
    fn refresh(&self, path: &std::path::Path) {
        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.list)
            .and_then(|mut file| writeln!(file, "{}", path.display()));

        match appended {
            Ok(()) => debug!(list = %self.list.display(), "recorded {}", path.display()),
            Err(e) => warn!(
                list = %self.list.display(),
                "cannot record changed file {}: {}",
                path.display(),
                e
            ),
        }
    }
}
