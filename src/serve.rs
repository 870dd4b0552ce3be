//! HTTP surface for Prometheus.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::connection::UnixSocketBuilder;
use crate::render::{self, RenderConfig};
use crate::scraper::Scraper;

#[derive(Clone)]
struct AppState {
    scraper: Arc<Scraper<UnixSocketBuilder>>,
    config: Arc<RenderConfig>,
}

/// Build the router serving fresh metrics at `endpoint` on every request.
pub fn router(endpoint: &str, scraper: Scraper<UnixSocketBuilder>, config: RenderConfig) -> Router {
    let state = AppState {
        scraper: Arc::new(scraper),
        config: Arc::new(config),
    };

    Router::new()
        .route(endpoint, get(metrics))
        .with_state(state)
}

pub async fn run(addr: SocketAddr, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("serving metrics on {local_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics(State(state): State<AppState>) -> Result<String, (StatusCode, &'static str)> {
    let internal_error = (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n");

    // The control socket is blocking std I/O and has no read deadline.
    let scraped = tokio::task::spawn_blocking(move || {
        render::prepare_output(&state.scraper, &state.config)
    })
    .await;

    match scraped {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(err)) => {
            let cause = std::error::Error::source(&err)
                .map(|source| format!(": {source}"))
                .unwrap_or_default();
            tracing::error!("scrape failed: {err}{cause}");
            Err(internal_error)
        }
        Err(err) => {
            tracing::error!("scrape task failed: {err}");
            Err(internal_error)
        }
    }
}
