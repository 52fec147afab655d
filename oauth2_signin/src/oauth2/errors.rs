use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OAuth2Error {
    /// Client id, secret or redirect URI missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
