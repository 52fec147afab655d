mod client;
mod config;
mod errors;
mod types;

pub use client::{IdentityProvider, OAuth2Client};
pub use config::{OAuth2Config, ProviderContext};
pub use errors::OAuth2Error;
pub use types::{TokenResponse, UserInfo};

pub(crate) use config::DEFAULT_SCOPES;
