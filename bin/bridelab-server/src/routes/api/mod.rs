pub mod chat;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api` (consumed by the portal UI).
pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(chat::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct PortalApi;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut spec = PortalApi::openapi();
    spec.merge(chat::ChatApi::openapi());
    spec
}
