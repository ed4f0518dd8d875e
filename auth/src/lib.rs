mod credentials;
mod error;
mod fetcher;
mod token;


pub use credentials::{Credentials, ServiceAccount};
pub use error::{AuthorizationError, CredentialError, Error};
pub use fetcher::{fetch_token, TokenFetcher};
pub use token::{Token, TokenType};

pub const ANALYTICS_READONLY: &str = "https://www.googleapis.com/auth/analytics.readonly";
pub const DEFAULT_SCOPES: &[&str] = &[ANALYTICS_READONLY];
const SENSITIVE: &str = "***";
