pub mod handlers;
pub mod templates;
pub mod views;

use std::{
    net::SocketAddr,
    path::Path,
    sync::Arc,
};

use axum::{
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
    routing::get,
    Router,
};
use tokio::{
    net::TcpListener,
    signal,
};
use tower_http::{
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    context::AppContext,
    core::YomireiError,
};

pub type SharedContext = Arc<AppContext>;

/// Internal failure while answering a request. Rendered as a bare 500.
#[derive(Debug)]
pub struct WebError(YomireiError);

impl From<YomireiError> for WebError {
    fn from(error: YomireiError) -> Self {
        WebError(error)
    }
}

impl From<askama::Error> for WebError {
    fn from(error: askama::Error) -> Self {
        WebError(error.into())
    }
}

impl From<tokio::task::JoinError> for WebError {
    fn from(error: tokio::task::JoinError) -> Self {
        WebError(YomireiError::Custom(format!("request worker failed: {error}")))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

pub fn build_router(ctx: SharedContext, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/category/:category", get(handlers::category))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(
    ctx: SharedContext,
    addr: SocketAddr,
    static_dir: &Path,
) -> Result<(), YomireiError> {
    let router = build_router(ctx, static_dir);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, static_dir = %static_dir.display(), "Listening");

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{
            signal,
            SignalKind,
        };
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
