use http::StatusCode;
use thiserror::Error;

use crate::observability::metrics::{
    REASON_CONFIG, REASON_DECODE, REASON_INVALID_ARGUMENT, REASON_MALFORMED, REASON_NO_TOKEN,
    REASON_STATUS, REASON_STORE, REASON_TRANSPORT,
};

/// Caller-facing failures of the product API.
#[derive(Debug, Error)]
pub enum GigaError {
    /// Empty or oversized SKU list.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No access token could be obtained for the site. Reported to callers as
    /// an invalid argument: the site is unusable as given.
    #[error("invalid argument: failed to obtain access token for site '{0}'")]
    TokenUnavailable(String),

    /// product/detailInfo answered with a non-success status.
    #[error("Giga request product/detailInfo failed: {} - {message}", .status.as_u16())]
    Http { status: StatusCode, message: String },

    #[error("Giga request product/detailInfo failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Giga product/detailInfo response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GigaError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GigaError::InvalidArgument(_) | GigaError::TokenUnavailable(_))
    }

    /// Transport, status and decoding failures all count as I/O errors.
    pub fn is_io(&self) -> bool {
        !self.is_invalid_argument()
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GigaError::Http { status, .. } => Some(*status),
            GigaError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn reason(&self) -> &'static str {
        match self {
            GigaError::InvalidArgument(_) => REASON_INVALID_ARGUMENT,
            GigaError::TokenUnavailable(_) => REASON_NO_TOKEN,
            GigaError::Http { .. } => REASON_STATUS,
            GigaError::Transport(_) => REASON_TRANSPORT,
            GigaError::Decode(_) => REASON_DECODE,
        }
    }
}

/// Why a token could not be produced. Absorbed by `TokenProvider::get_token`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("site '{0}' is not mapped to a client id")]
    UnknownSite(String),

    #[error("client '{0}' has no registered secret")]
    MissingSecret(String),

    #[error("token endpoint responded {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("token response is missing '{0}'")]
    MissingField(&'static str),

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("token store failure: {0}")]
    Store(anyhow::Error),
}

impl TokenError {
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            TokenError::UnknownSite(_) | TokenError::MissingSecret(_) => REASON_CONFIG,
            TokenError::Status { .. } => REASON_STATUS,
            TokenError::MissingField(_) | TokenError::Decode(_) => REASON_MALFORMED,
            TokenError::Transport(_) => REASON_TRANSPORT,
            TokenError::Store(_) => REASON_STORE,
        }
    }
}
