use axum::Router;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Serve the sign-in page on every interface; the task ends only on a server error
pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<std::io::Result<()>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tokio::spawn(async move {
        tracing::info!("Sign-in page at http://localhost:{}/ (bound to {})", port, addr);
        axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
    })
}

/// Filter used when `RUST_LOG` is unset
///
/// Debug builds trace both sign-in crates and the binary itself.
fn default_directives(app_name: &str) -> String {
    if cfg!(debug_assertions) {
        format!("oauth2_signin_axum=trace,oauth2_signin=trace,{app_name}=trace,info")
    } else {
        "info".to_string()
    }
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(app_name)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Log filter defaults to: {}", default_directives(app_name));
}
