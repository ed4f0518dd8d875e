use crate::{Credentials, Error, Token};
use std::path::Path;
use std::sync::Arc;

/// Exchanges one set of service account credentials for access tokens.
///
/// Every call to [`TokenFetcher::fetch_token`] performs exactly one request to the token
/// endpoint. Nothing is cached or retried.
#[derive(Clone)]
pub struct TokenFetcher {
    client: reqwest::Client,
    credentials: Arc<Credentials>,
}

impl TokenFetcher {
    pub fn new(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials: Arc::new(credentials),
        }
    }

    #[tracing::instrument(err, skip(client))]
    pub async fn from_file(client: reqwest::Client, path: &Path) -> Result<Self, Error> {
        Ok(Self::new(client, Credentials::from_file(path).await?))
    }

    #[tracing::instrument(err, ret, skip(self))]
    pub async fn fetch_token(&self, scopes: &[&str]) -> Result<Token, Error> {
        self.credentials.refresh(&self.client, scopes).await
    }
}

/// Loads the key file at `key_file_path` and requests a single token for `scopes`.
pub async fn fetch_token(
    client: &reqwest::Client,
    key_file_path: &Path,
    scopes: &[&str],
) -> Result<Token, Error> {
    TokenFetcher::from_file(client.clone(), key_file_path)
        .await?
        .fetch_token(scopes)
        .await
}
