use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use propgen_generator::Generator;

use super::{TargetArgs, UnwrapOrExit};
use crate::{
    notifier::ChangeListNotifier,
    reports::{GenerateReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    target: TargetArgs,

    /// Append the path of a rewritten file to this list
    #[arg(long, value_name = "FILE")]
    changed_list: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let target = self.target.resolve()?;
        let config = &target.config;

        let mut generator = Generator::new(config.format, &config.prefix, &config.project);
        if let Some(list) = &self.changed_list {
            generator = generator.with_notifier(ChangeListNotifier::new(list));
        }

        let outcome = generator
            .maybe_generate(
                &target.properties,
                &target.base,
                &config.filename,
                config.charset,
            )
            .unwrap_or_exit();

        GenerateReport {
            project: config.project.clone(),
            format: config.format,
            path: outcome.path,
            written: outcome.written,
            property_count: target.properties.len(),
        }
        .render(&mut TerminalOutput::new());

        Ok(())
    }
}
