use thiserror::Error;

/// Result type for listings fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Failures that prevent a fetch from producing a [`crate::models::FetchResult`].
///
/// A non-2xx response is not an error here: it is reported as
/// [`crate::models::FetchResult::Error`] so the caller sees the status code.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The release identifier could not be decoded into an integer.
    #[error("invalid release identifier: {0}")]
    InvalidInput(String),

    /// The HTTP client could not be constructed from the configuration.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// No usable response was received (DNS, connect, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FetchError {
    pub fn transport(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        FetchError::Transport {
            url: url.into(),
            source: source.into(),
        }
    }
}
