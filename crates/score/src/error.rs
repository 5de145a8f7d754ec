//! CLI error types.

use score_config::ConfigError;
use score_content::ContentError;
use score_server::ServerError;
use score_site::BundleError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Bundle(#[from] BundleError),

    #[error("{0}")]
    Server(#[from] ServerError),
}
