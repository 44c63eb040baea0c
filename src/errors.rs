use thiserror::Error;

/// Error types for resolver startup and I/O
///
/// Per-source transport failures are deliberately absent: the sources map
/// them to negative lookup outcomes and the orchestrator falls through to
/// the next source instead of failing the message.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("HTTP Client Error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(String),
}
