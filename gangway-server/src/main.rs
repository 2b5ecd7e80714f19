use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use gangway_core::{GangwayError, LaunchSpec};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Body returned while the application binary is not serving the traffic
/// itself. Real deployments start the binary through the platform's start
/// command; anything landing here got the placeholder entry point instead.
const PLACEHOLDER_BODY: &str =
    "Application binary should be running via the platform start command";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port = LaunchSpec::default().resolved_port();
    let port: u16 = port
        .parse()
        .map_err(|_| GangwayError::InvalidPort(port.clone()))?;

    let app = build_router();

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Placeholder responder listening on http://0.0.0.0:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router() -> Router {
    // Every method and path gets the same answer.
    Router::new()
        .fallback(placeholder)
        .layer(TraceLayer::new_for_http())
}

async fn placeholder() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        PLACEHOLDER_BODY,
    )
}
