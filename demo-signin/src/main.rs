use axum::Router;

use oauth2_signin_axum::{O2S_ROUTE_PREFIX, init, oauth2_signin_router};

mod server;

use crate::server::{init_tracing, spawn_http_server};

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    // A missing OAuth2 configuration is not fatal; the page explains it
    let provider = init().await?;

    let app = if O2S_ROUTE_PREFIX.is_empty() {
        oauth2_signin_router(provider)
    } else {
        Router::new().nest(O2S_ROUTE_PREFIX.as_str(), oauth2_signin_router(provider))
    };

    let port = port_from_env(std::env::var("PORT").ok().as_deref());
    spawn_http_server(port, app).await??;
    Ok(())
}

fn port_from_env(value: Option<&str>) -> u16 {
    match value.map(str::parse::<u16>) {
        Some(Ok(port)) => port,
        Some(Err(e)) => {
            tracing::warn!("Invalid PORT, using {}: {}", DEFAULT_PORT, e);
            DEFAULT_PORT
        }
        None => DEFAULT_PORT,
    }
}
