mod check;
mod completions;
mod generate;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use propgen_core::{Charset, Format, PropertySet};
use propgen_manifest::{GeneratorConfig, ManifestFile};

use crate::sources::{self, KeyValue};

/// Extension trait for exiting on manifest and generation errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for propgen_generator::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for propgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "propgen")]
#[command(version)]
#[command(about = "Write build metadata properties files only when they change")]
pub(crate) struct Cli {
    /// Log debug details (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the properties file if its content changed
    Generate(GenerateCommand),

    /// Report whether the properties file is up to date without writing
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Options shared by commands that resolve a properties file.
#[derive(Args)]
pub(crate) struct TargetArgs {
    /// Path to propgen.toml (defaults to ./propgen.toml)
    #[arg(short, long, default_value = propgen_manifest::MANIFEST_FILENAME)]
    pub config: PathBuf,

    /// Read properties from a .json or .properties file
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Set a property (repeatable, overrides --from and the manifest)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<KeyValue>,

    /// Output format (overrides propgen.toml setting)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Namespace prefix of the build timestamp key
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output filename, relative to the output directory unless absolute
    #[arg(long)]
    pub filename: Option<String>,

    /// Output directory (relative to the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Unit name shown in status lines
    #[arg(long)]
    pub project: Option<String>,

    /// Character encoding for reading and writing
    #[arg(long)]
    pub charset: Option<Charset>,
}

/// Everything a command needs to call the generator.
pub(crate) struct Target {
    pub config: GeneratorConfig,
    pub base: PathBuf,
    pub properties: PropertySet,
}

impl TargetArgs {
    /// Load the manifest, apply command-line overrides and gather properties.
    pub fn resolve(&self) -> Result<Target> {
        let manifest_file = ManifestFile::open(&self.config).unwrap_or_exit();
        let manifest = manifest_file.manifest();

        let mut config = manifest.generator.clone();
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(filename) = &self.filename {
            config.filename = filename.clone();
        }
        if let Some(project) = &self.project {
            config.project = project.clone();
        }
        if let Some(charset) = self.charset {
            config.charset = charset;
        }

        let base = match &self.output {
            Some(output) => output.clone(),
            None => manifest_file.root().join(&config.output),
        };

        let mut properties = manifest.property_set();
        if let Some(from) = &self.from {
            properties.extend(sources::read_properties_file(from, config.charset)?);
        }
        properties.extend(self.set.iter().map(|kv| (kv.key.as_str(), kv.value.as_str())));

        Ok(Target {
            config,
            base,
            properties,
        })
    }
}
