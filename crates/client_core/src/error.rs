use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid api configuration: {0}")]
    InvalidConfig(String),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("server rejected request: {message}")]
    Rejected { message: String },
}

/// Broad origin of a [`ClientError`], for callers that only need to say where it went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Server,
    Internal,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidConfig(_) => ErrorKind::Config,
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Status { .. } | ClientError::Decode { .. } | ClientError::Rejected { .. } => {
                ErrorKind::Server
            }
            ClientError::Encode(_) => ErrorKind::Internal,
        }
    }
}
