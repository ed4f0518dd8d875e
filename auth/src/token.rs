use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

#[derive(Clone)]
pub struct Token {
    pub access_token: String,
    pub token_type: TokenType,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Value for an `Authorization` header, e.g. `Bearer ya29...`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &crate::SENSITIVE)
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// https://datatracker.ietf.org/doc/html/rfc6749#section-7.1
/// `token_type` as sent by the token endpoint. Compared case-insensitively.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TokenType(String);

impl TokenType {
    pub fn bearer() -> Self {
        Self("Bearer".to_owned())
    }

    pub fn is_bearer(&self) -> bool {
        self.0.eq_ignore_ascii_case("bearer")
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
