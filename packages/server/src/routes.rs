use crate::error::RequestError;
use crate::service::GenerationService;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use streamui_catalog::Catalog;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub const GENERATE_PATH: &str = "/api/generate-ui";
pub const CATALOG_PATH: &str = "/api/catalog";

/// HTTP surface of a [`GenerationService`]
pub fn router(service: GenerationService) -> Router {
    Router::new()
        .route(GENERATE_PATH, post(generate_ui))
        .route(CATALOG_PATH, get(catalog))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(service))
}

/// Serve until the listener fails
pub async fn serve(listener: TcpListener, service: GenerationService) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Serving {} on http://{}", GENERATE_PATH, addr);
    axum::serve(listener, router(service)).await
}

async fn generate_ui(
    State(service): State<Arc<GenerationService>>,
    body: Bytes,
) -> Result<Response, RequestError> {
    let prompt = GenerationService::parse_body(&body)?;
    let stream = service.generate(prompt).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response())
}

async fn catalog(State(service): State<Arc<GenerationService>>) -> Json<Catalog> {
    Json(service.catalog().as_ref().clone())
}
