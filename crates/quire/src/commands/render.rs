//! `quire render` command implementation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};

use super::build_book;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to manifest file (default: auto-discover quire.toml).
    #[arg(short, long, env = "QUIRE_CONFIG")]
    config: Option<PathBuf>,

    /// File to write the serialized book to (overrides manifest; default stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output (show cache and mutation logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is invalid, a page exceeds the size
    /// limit, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let book = build_book(&config)?;
        let serialized = book.serialized_form()?;

        match &config.output_resolved.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, serialized)?;
                output.success(&format!(
                    "Wrote {} page(s) to {}",
                    book.len(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{serialized}")?;
            }
        }

        Ok(())
    }
}
