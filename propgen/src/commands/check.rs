use clap::Args;
use eyre::Result;
use propgen_generator::Generator;

use super::TargetArgs;
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    target: TargetArgs,
}

impl CheckCommand {
    /// Run the check command, exiting with status 1 when a write is needed
    pub fn run(&self) -> Result<()> {
        let target = self.target.resolve()?;
        let config = &target.config;

        let generator = Generator::new(config.format, &config.prefix, &config.project);
        let (path, outcome) = generator.check(
            &target.properties,
            &target.base,
            &config.filename,
            config.charset,
        );

        CheckReport {
            path,
            outcome,
            volatile_key: generator.volatile_key(),
        }
        .render(&mut TerminalOutput::new());

        if outcome.needs_generation() {
            std::process::exit(1);
        }

        Ok(())
    }
}
