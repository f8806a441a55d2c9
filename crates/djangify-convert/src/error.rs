//! Conversion error types.

use std::path::PathBuf;

/// Error raised while converting a single file or preparing a batch.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid text in the selected encoding.
    #[error("Failed to decode {} as {encoding}", path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    /// Output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input directory could not be listed.
    #[error("Failed to list {}: {source}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input path has no usable file name.
    #[error("Cannot derive an output name from {}", .0.display())]
    InvalidFileName(PathBuf),
}
