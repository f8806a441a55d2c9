//! Conversion command implementation.

use std::path::PathBuf;

use clap::Args;
use djangify_config::{CliSettings, Config};
use djangify_convert::{ConvertOptions, Converter, discover_html_files, resolve_inputs};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for converting HTML files.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// File names to convert, relative to the base directory
    /// (default: every *.html file in the base directory).
    #[arg(value_name = "FILES")]
    pub(crate) files: Vec<PathBuf>,

    /// Base directory holding the HTML files (default: current directory).
    #[arg(short = 'd', long = "base-dir")]
    pub(crate) base_dir: Option<PathBuf>,

    /// Django app name used to namespace static paths.
    #[arg(short = 'a', long)]
    pub(crate) app_name: Option<String>,

    /// Encoding of the HTML files (default: utf-8).
    #[arg(short, long)]
    pub(crate) encoding: Option<String>,

    /// Output directory, relative to the base directory (default: Modified_files).
    #[arg(short, long)]
    pub(crate) output_dir: Option<PathBuf>,

    /// Do not write `{% load static %}` at the top of generated files.
    #[arg(long)]
    pub(crate) no_load_header: bool,

    /// Skip every line containing the letter "a" (legacy anchor filter).
    #[arg(long)]
    pub(crate) exclude_anchor_lines: bool,

    /// Path to configuration file (default: auto-discover djangify.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose output (log every converted file).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the output directory cannot be
    /// created or the base directory cannot be listed. Failures of single
    /// files are reported and do not make the command fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_dir: self.base_dir,
            output_dir: self.output_dir,
            app_name: self.app_name,
            encoding: self.encoding,
            load_static_header: self.no_load_header.then_some(false),
            exclude_anchor_lines: self.exclude_anchor_lines.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let base_dir = &config.convert_resolved.base_dir;

        let options = ConvertOptions::from_config(&config);
        output.setting("Directory", &base_dir.display().to_string());
        output.setting(
            "app_name",
            config.convert_resolved.app_name.as_deref().unwrap_or("None"),
        );
        output.setting("Encoding", options.encoding.name());

        let converter = Converter::new(options);
        converter.prepare_output_dir()?;

        let inputs = if self.files.is_empty() {
            discover_html_files(base_dir)?
        } else {
            resolve_inputs(base_dir, &self.files)
        };

        if inputs.is_empty() {
            output.warning(&format!("No HTML files found in {}", base_dir.display()));
            return Ok(());
        }

        tracing::info!(
            files = inputs.len(),
            output_dir = %converter.options().output_dir.display(),
            "Starting conversion"
        );
        let report = converter.convert_batch(&inputs);

        for file in &report.converted {
            output.generated(&file.output, base_dir);
        }
        for failed in &report.failed {
            output.failed(failed);
        }
        output.summary(&report);

        Ok(())
    }
}
