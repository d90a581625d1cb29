use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

// Three-way taxonomy: Validation never reaches the network, Remote carries the
// service's own message verbatim, Transport is everything reqwest can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Remote(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn validation(detail: impl Into<String>) -> Self {
        ClientError::Validation(detail.into())
    }

    pub fn remote(detail: impl Into<String>) -> Self {
        ClientError::Remote(detail.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
