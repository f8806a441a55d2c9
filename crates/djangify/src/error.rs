//! CLI error types.

use djangify_config::ConfigError;
use djangify_convert::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Convert(#[from] ConvertError),
}
