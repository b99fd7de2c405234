use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::Key, Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, webtoons};

pub fn build_app(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    // Key::derive_from wants at least 32 bytes of entropy; AppConfig enforces that.
    let session_key = Key::derive_from(state.config.session.secret.as_bytes());
    let session_layer = SessionManagerLayer::new(session_store)
        .with_signed(session_key)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.session.ttl_minutes,
        )));

    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(webtoons::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
