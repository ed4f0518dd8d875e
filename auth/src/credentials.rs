pub(crate) mod service_account;

pub use service_account::ServiceAccount;

use crate::{CredentialError, Error, Token};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

#[derive(Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
enum File {
    ServiceAccount(service_account::Key),
}

#[derive(Debug)]
pub enum Credentials {
    ServiceAccount(ServiceAccount),
}

impl Credentials {
    #[tracing::instrument(err)]
    pub async fn from_file(path: &Path) -> Result<Self, Error> {
        tracing::debug!("loading credentials from {}", path.display());
        let data = fs::read(path)
            .await
            .map_err(|source| CredentialError::Io {
                path: path.to_owned(),
                source,
            })?;
        Self::from_slice(&data)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        match serde_json::from_slice::<File>(data).map_err(CredentialError::from)? {
            File::ServiceAccount(key) => Ok(Self::ServiceAccount(ServiceAccount::new(key)?)),
        }
    }

    #[tracing::instrument(err, ret, skip(client))]
    pub async fn refresh(&self, client: &reqwest::Client, scopes: &[&str]) -> Result<Token, Error> {
        match &self {
            Self::ServiceAccount(credentials) => credentials.refresh(client, scopes).await,
        }
    }
}
