use std::sync::Arc;
use url::Url;

use super::client::{IdentityProvider, OAuth2Client};
use super::errors::OAuth2Error;

/// Scopes requested from the identity provider
pub(crate) const DEFAULT_SCOPES: &[&str] = &["profile", "email"];

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Client credentials and endpoints of the identity provider
#[derive(Clone)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl std::fmt::Debug for OAuth2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .finish()
    }
}

impl OAuth2Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, OAuth2Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OAuth2Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            client_id: required(&lookup, "CLIENT_ID")?,
            client_secret: required(&lookup, "CLIENT_SECRET")?,
            auth_url: endpoint("OAUTH2_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: endpoint("OAUTH2_TOKEN_URL", DEFAULT_TOKEN_URL),
            userinfo_url: endpoint("OAUTH2_USERINFO_URL", DEFAULT_USERINFO_URL),
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, OAuth2Error>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| OAuth2Error::Configuration(format!("{key} is not set")))
}

/// A configured identity provider together with the redirect URIs it was registered with
///
/// The page flow redirects back to `redirect_uri`; the minimal page uses
/// `minimal_redirect_uri`.
#[derive(Clone)]
pub struct ProviderContext {
    pub provider: Arc<dyn IdentityProvider>,
    pub redirect_uri: String,
    pub minimal_redirect_uri: String,
}

impl ProviderContext {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        redirect_uri: impl Into<String>,
        minimal_redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            redirect_uri: redirect_uri.into(),
            minimal_redirect_uri: minimal_redirect_uri.into(),
        }
    }

    /// Build the reqwest-backed client from `CLIENT_ID`, `CLIENT_SECRET` and `REDIRECT_URI`
    pub fn from_env() -> Result<Self, OAuth2Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, OAuth2Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = OAuth2Config::from_lookup(&lookup)?;
        let redirect_uri = required(&lookup, "REDIRECT_URI")?;
        let minimal_redirect_uri = match lookup("MINIMAL_REDIRECT_URI").filter(|v| !v.is_empty())
        {
            Some(uri) => parse_absolute(&uri, "MINIMAL_REDIRECT_URI")?.to_string(),
            None => default_minimal_redirect_uri(&redirect_uri)?,
        };
        parse_absolute(&redirect_uri, "REDIRECT_URI")?;

        let client = OAuth2Client::new(config)?;
        Ok(Self::new(Arc::new(client), redirect_uri, minimal_redirect_uri))
    }
}

fn parse_absolute(uri: &str, key: &str) -> Result<Url, OAuth2Error> {
    Url::parse(uri).map_err(|e| OAuth2Error::Configuration(format!("{key} is invalid: {e}")))
}

/// `REDIRECT_URI` with a `minimal` segment appended to its path
///
/// The page is mounted at the route prefix itself, so `http://host/signin`
/// maps to `http://host/signin/minimal` and `http://host/` to `http://host/minimal`.
fn default_minimal_redirect_uri(redirect_uri: &str) -> Result<String, OAuth2Error> {
    let mut url = parse_absolute(redirect_uri, "REDIRECT_URI")?;
    let path = format!("{}/minimal", url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url.to_string())
}
