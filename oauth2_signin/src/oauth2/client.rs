use async_trait::async_trait;
use url::Url;

use super::config::OAuth2Config;
use super::errors::OAuth2Error;
use super::types::{TokenResponse, UserInfo};

/// The three calls made against the external identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Build the URL the visitor is sent to for consent. No network access.
    fn authorization_url(&self, redirect_uri: &str, scopes: &[&str])
    -> Result<String, OAuth2Error>;

    /// Exchange an authorization code for an access token.
    async fn exchange_code_for_token(
        &self,
        redirect_uri: &str,
        code: &str,
    ) -> Result<TokenResponse, OAuth2Error>;

    /// Fetch the profile of the user the access token belongs to.
    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, OAuth2Error>;
}

/// reqwest-backed identity provider client
///
/// No retries and no timeout tuning: failures go straight back to the caller.
pub struct OAuth2Client {
    config: OAuth2Config,
    http: reqwest::Client,
}

impl OAuth2Client {
    pub fn new(config: OAuth2Config) -> Result<Self, OAuth2Error> {
        Url::parse(&config.auth_url)
            .map_err(|e| OAuth2Error::Configuration(format!("OAUTH2_AUTH_URL is invalid: {e}")))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| OAuth2Error::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl IdentityProvider for OAuth2Client {
    fn authorization_url(
        &self,
        redirect_uri: &str,
        scopes: &[&str],
    ) -> Result<String, OAuth2Error> {
        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| OAuth2Error::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &scopes.join(" "));

        tracing::debug!("Auth URL: {}", url);
        Ok(url.into())
    }

    async fn exchange_code_for_token(
        &self,
        redirect_uri: &str,
        code: &str,
    ) -> Result<TokenResponse, OAuth2Error> {
        let response = self
            .http
            .post(self.config.token_url.as_str())
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!("Token Exchange Response: {} {}", status, response_body);
            return Err(OAuth2Error::TokenExchange(status.to_string()));
        }

        let token: TokenResponse = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::TokenExchange(format!("Malformed token response: {e}")))?;

        if token.access_token.is_empty() {
            return Err(OAuth2Error::TokenExchange(
                "Empty access token in response".to_string(),
            ));
        }

        tracing::debug!("Token response: {:?}", token);
        Ok(token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, OAuth2Error> {
        let response = self
            .http
            .get(self.config.userinfo_url.as_str())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuth2Error::FetchUserInfo(status.to_string()));
        }

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        let user_info: UserInfo = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::FetchUserInfo(format!("Malformed user info: {e}")))?;

        if !user_info.is_complete() {
            return Err(OAuth2Error::FetchUserInfo(
                "User info is missing id, email or picture".to_string(),
            ));
        }

        tracing::debug!("User data: {:#?}", user_info);
        Ok(user_info)
    }
}
