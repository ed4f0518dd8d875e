// https://developers.google.com/identity/protocols/oauth2/service-account#authorizingrequests

use crate::{AuthorizationError, CredentialError, Error, Token, TokenType};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_with::formats::SpaceSeparator;
use serde_with::StringWithSeparator;
use std::fmt;

pub(crate) const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[serde_with::serde_as]
#[derive(Deserialize)]
pub(super) struct Key {
    client_email: String,
    private_key: String,
    private_key_id: Option<String>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    token_uri: Url,
}

pub struct ServiceAccount {
    pub client_email: String,
    pub private_key_id: Option<String>,
    pub token_uri: Url,
    private_key: EncodingKey,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri.as_str())
            .field("private_key", &crate::SENSITIVE)
            .finish()
    }
}

impl ServiceAccount {
    pub(super) fn new(key: Key) -> Result<Self, CredentialError> {
        let private_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(CredentialError::PrivateKey)?;
        Ok(Self {
            client_email: key.client_email,
            private_key_id: key.private_key_id,
            token_uri: key.token_uri,
            private_key,
        })
    }

    /// Signs the JWT presented to the token endpoint. Valid for one hour from `now`.
    pub(crate) fn assertion(
        &self,
        scopes: &[&str],
        now: DateTime<Utc>,
    ) -> Result<String, CredentialError> {
        #[serde_with::serde_as]
        #[derive(Serialize)]
        struct Claims<'a> {
            iss: &'a str,
            #[serde_as(as = "StringWithSeparator::<SpaceSeparator, &str>")]
            scope: Vec<&'a str>,
            aud: &'a str,
            iat: i64,
            exp: i64,
        }

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();
        jsonwebtoken::encode(
            &header,
            &Claims {
                iss: &self.client_email,
                scope: scopes.into(),
                aud: self.token_uri.as_str(),
                iat: now.timestamp(),
                exp: (now + Duration::hours(1)).timestamp(),
            },
            &self.private_key,
        )
        .map_err(CredentialError::PrivateKey)
    }

    #[tracing::instrument(err, ret, skip(client))]
    pub async fn refresh(&self, client: &reqwest::Client, scopes: &[&str]) -> Result<Token, Error> {
        if scopes.is_empty() || scopes.iter().any(|scope| scope.trim().is_empty()) {
            return Err(Error::NoScopes);
        }

        let now = Utc::now();
        let assertion = self.assertion(scopes, now)?;

        let response = client
            .post(self.token_uri.clone())
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(AuthorizationError::from)?;
        let status = response.status();
        let body = response.bytes().await.map_err(AuthorizationError::from)?;
        if !status.is_success() {
            return Err(AuthorizationError::rejected(status, &body).into());
        }

        #[derive(Deserialize)]
        struct Response {
            access_token: String,
            expires_in: i64,
            #[serde(default = "TokenType::bearer")]
            token_type: TokenType,
        }

        let response =
            serde_json::from_slice::<Response>(&body).map_err(AuthorizationError::from)?;
        if response.access_token.is_empty()
            || response.access_token.contains(char::is_whitespace)
            || !response.token_type.is_bearer()
        {
            return Err(AuthorizationError::InvalidToken.into());
        }
        let expires_at = Duration::try_seconds(response.expires_in)
            .filter(|lifetime| *lifetime >= Duration::zero())
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthorizationError::InvalidExpiry(response.expires_in))?;
        Ok(Token {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_at,
        })
    }
}
