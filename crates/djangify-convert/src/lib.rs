//! HTML file discovery and conversion to Django templates.
//!
//! Reads HTML files line by line, rewrites local asset references with
//! [`djangify_rewrite`] and writes each result as `<name>.html` into an output
//! directory. Files are independent, so a batch is converted in parallel and a
//! failing file never stops the others.

mod converter;
mod discover;
mod encoding;
mod error;

pub use converter::{
    BatchReport, ConvertOptions, ConvertedFile, Converter, FailedFile, LOAD_STATIC_HEADER,
    output_file_name,
};
pub use discover::{discover_html_files, resolve_inputs};
pub use encoding::resolve_encoding;
pub use error::ConvertError;
