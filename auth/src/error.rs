use reqwest::StatusCode;
use serde::Deserialize;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error("at least one non-empty scope is required")]
    NoScopes,
}

impl Error {
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Credential(_))
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }
}

/// The credential file could not be turned into a usable signing identity.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed credential file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unusable private key: {0}")]
    PrivateKey(#[source] jsonwebtoken::errors::Error),
}

/// The token endpoint refused the assertion or the exchange did not complete.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("[{status}] {error}: {}", .description.as_deref().unwrap_or("no description"))]
    Rejected {
        status: StatusCode,
        error: String,
        description: Option<String>,
    },
    #[error("malformed token response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("token endpoint returned an unusable access token")]
    InvalidToken,
    #[error("token endpoint returned an unusable lifetime of {0}s")]
    InvalidExpiry(i64),
}

impl AuthorizationError {
    // https://datatracker.ietf.org/doc/html/rfc6749#section-5.2
    pub(crate) fn rejected(status: StatusCode, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Response {
            error: String,
            error_description: Option<String>,
        }

        match serde_json::from_slice::<Response>(body) {
            Ok(response) => Self::Rejected {
                status,
                error: response.error,
                description: response.error_description,
            },
            Err(_) => Self::Rejected {
                status,
                error: String::from_utf8_lossy(body).trim().to_owned(),
                description: None,
            },
        }
    }
}
