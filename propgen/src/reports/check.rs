//! Check command report.

use std::path::PathBuf;

use propgen_generator::CheckOutcome;

use super::output::{Output, Report};

/// Report data from a dry comparison against the file on disk.
#[derive(Debug)]
pub struct CheckReport {
    pub path: PathBuf,
    pub outcome: CheckOutcome,
    /// Key left out of the comparison.
    pub volatile_key: String,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Ignoring", &self.volatile_key);
        let path = self.path.display();
        match self.outcome {
            CheckOutcome::UpToDate => out.success(&format!("{} is up to date", path)),
            CheckOutcome::Stale => out.pending(&format!("{} is out of date", path)),
            CheckOutcome::Missing => out.pending(&format!("{} does not exist", path)),
            CheckOutcome::Unreadable => out.pending(&format!("{} cannot be read", path)),
        }
    }
}
