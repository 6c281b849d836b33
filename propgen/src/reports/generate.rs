//! Generate command report.

use std::path::PathBuf;

use propgen_core::Format;

use super::output::{Output, Report};

/// Report data from one generate-or-skip run.
#[derive(Debug)]
pub struct GenerateReport {
    pub project: String,
    pub format: Format,
    /// Resolved output path.
    pub path: PathBuf,
    /// Whether the file was rewritten.
    pub written: bool,
    pub property_count: usize,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Project", &self.project);
        out.key_value("Format", self.format.as_str());
        out.key_value("Properties", &self.property_count.to_string());
        if self.written {
            out.success(&format!("Wrote {}", self.path.display()));
        } else {
            out.success(&format!("{} is up to date", self.path.display()));
        }
    }
}
