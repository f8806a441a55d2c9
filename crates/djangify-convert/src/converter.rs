//! Per-file and batch conversion.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use djangify_config::Config;
use djangify_rewrite::{LineRewriter, ScanPolicy, namespace_prefix};
use encoding_rs::{Encoding, UTF_8};
use rayon::prelude::*;

use crate::encoding::{decode, encode, resolve_encoding};
use crate::error::ConvertError;

/// Header written at the top of every output file, followed by a blank line.
pub const LOAD_STATIC_HEADER: &str = "{% load static %}\n\n";

/// Extension forced on every output file.
const OUTPUT_EXTENSION: &str = "html";

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving the converted files.
    pub output_dir: PathBuf,
    /// Prefix prepended to every rewritten path (e.g. `"main/"`).
    pub prefix: String,
    /// Encoding used to read and write files.
    pub encoding: &'static Encoding,
    /// Write [`LOAD_STATIC_HEADER`] at the top of each file.
    pub load_static_header: bool,
    /// Which lines the rewriter scans.
    pub scan_policy: ScanPolicy,
}

impl ConvertOptions {
    /// Create options with UTF-8, the load header and no prefix.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: String::new(),
            encoding: UTF_8,
            load_static_header: true,
            scan_policy: ScanPolicy::default(),
        }
    }

    /// Build options from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let convert = &config.convert_resolved;
        let scan_policy = if config.rewrite.exclude_anchor_lines {
            ScanPolicy::ExcludeAnchorLines
        } else {
            ScanPolicy::AllLines
        };

        Self {
            output_dir: convert.output_path(),
            prefix: namespace_prefix(convert.app_name.as_deref()),
            encoding: resolve_encoding(&convert.encoding),
            load_static_header: convert.load_static_header,
            scan_policy,
        }
    }
}

/// A successfully converted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Source file.
    pub input: PathBuf,
    /// Written file.
    pub output: PathBuf,
    /// Number of lines read.
    pub lines: usize,
    /// Number of references replaced with a static tag.
    pub substitutions: usize,
}

/// A file that could not be converted.
#[derive(Debug)]
pub struct FailedFile {
    /// Source file.
    pub input: PathBuf,
    /// Reason for the failure.
    pub error: ConvertError,
}

/// Outcome of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written successfully.
    pub converted: Vec<ConvertedFile>,
    /// Files that failed.
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// Total substitutions across converted files.
    #[must_use]
    pub fn substitutions(&self) -> usize {
        self.converted.iter().map(|file| file.substitutions).sum()
    }

    /// Whether every file was converted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Output file name for an input path.
///
/// The name is the input file name up to its first `.`, with the extension
/// forced to `.html`: `index.htm` and `index.min.html` both give
/// `index.html`. A name starting with `.` falls back to the file stem.
pub fn output_file_name(input: &Path) -> Option<String> {
    let file_name = input.file_name()?.to_string_lossy();
    let base = match file_name.split('.').next() {
        Some(base) if !base.is_empty() => base.to_owned(),
        _ => input.file_stem()?.to_string_lossy().into_owned(),
    };
    Some(format!("{base}.{OUTPUT_EXTENSION}"))
}

/// Converts HTML files into Django templates.
pub struct Converter {
    options: ConvertOptions,
    rewriter: LineRewriter,
}

impl Converter {
    /// Create a converter.
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        let rewriter = LineRewriter::new().with_scan_policy(options.scan_policy);
        Self { options, rewriter }
    }

    /// Options this converter was created with.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Create the output directory if it does not exist.
    pub fn prepare_output_dir(&self) -> Result<(), ConvertError> {
        let path = &self.options.output_dir;
        fs::create_dir_all(path).map_err(|source| ConvertError::CreateDir {
            path: path.clone(),
            source,
        })
    }

    /// Output path for an input file.
    pub fn output_path(&self, input: &Path) -> Result<PathBuf, ConvertError> {
        output_file_name(input)
            .map(|name| self.options.output_dir.join(name))
            .ok_or_else(|| ConvertError::InvalidFileName(input.to_path_buf()))
    }

    /// Convert a single file.
    ///
    /// The input is read and decoded completely before anything is written,
    /// so a failed read leaves no output file behind.
    pub fn convert_file(&self, input: &Path) -> Result<ConvertedFile, ConvertError> {
        let output = self.output_path(input)?;

        let bytes = fs::read(input).map_err(|source| ConvertError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let text = decode(&bytes, self.options.encoding, input)?;

        let rewritten = self.rewriter.rewrite_text(&text, &self.options.prefix);

        let mut content = String::with_capacity(LOAD_STATIC_HEADER.len() + rewritten.text.len());
        if self.options.load_static_header {
            content.push_str(LOAD_STATIC_HEADER);
        }
        content.push_str(&rewritten.text);

        fs::write(&output, encode(&content, self.options.encoding)).map_err(|source| {
            ConvertError::Write {
                path: output.clone(),
                source,
            }
        })?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            substitutions = rewritten.substitutions,
            "Converted file"
        );

        Ok(ConvertedFile {
            input: input.to_path_buf(),
            output,
            lines: text.lines().count(),
            substitutions: rewritten.substitutions,
        })
    }

    /// Convert files in parallel.
    ///
    /// Failures are collected in the report and do not stop other files.
    pub fn convert_batch(&self, inputs: &[PathBuf]) -> BatchReport {
        self.warn_on_output_collisions(inputs);

        let results: Vec<Result<ConvertedFile, FailedFile>> = inputs
            .par_iter()
            .map(|input| {
                self.convert_file(input).map_err(|error| {
                    tracing::debug!(
                        input = %input.display(),
                        error = %error,
                        "Failed to convert file"
                    );
                    FailedFile {
                        input: input.clone(),
                        error,
                    }
                })
            })
            .collect();

        partition_results(results)
    }

    /// Warn when several inputs map to the same output file.
    fn warn_on_output_collisions(&self, inputs: &[PathBuf]) {
        let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
        for input in inputs {
            let Ok(output) = self.output_path(input) else {
                continue;
            };
            if let Some(previous) = seen.insert(output.clone(), input) {
                tracing::warn!(
                    output = %output.display(),
                    first = %previous.display(),
                    second = %input.display(),
                    "Inputs share an output file, only one result is kept"
                );
            }
        }
    }
}

fn partition_results(results: Vec<Result<ConvertedFile, FailedFile>>) -> BatchReport {
    let mut report = BatchReport {
        converted: Vec::with_capacity(results.len()),
        failed: Vec::new(),
    };

    for result in results {
        match result {
            Ok(file) => report.converted.push(file),
            Err(failed) => report.failed.push(failed),
        }
    }

    report
}
