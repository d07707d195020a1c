//! HTTP routes for the registry lookup endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::client::RegistryClient;
use crate::error::{NorthernError, Result};

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company_number: Option<String>,
}

/// Build the router
pub fn registry_router(client: Arc<RegistryClient>) -> Router {
    Router::new()
        .route("/company", get(get_company))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

/// `GET /company?company_number=<id>`: upstream status and body relayed verbatim
async fn get_company(
    State(client): State<Arc<RegistryClient>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Response> {
    let company_number = query
        .company_number
        .filter(|n| !n.is_empty())
        .ok_or_else(|| NorthernError::InvalidInput("company_number is required".into()))?;

    let (status, body) = client.company_profile(&company_number).await.map_err(|e| {
        tracing::error!(company_number = %company_number, "Registry lookup failed: {}", e);
        e
    })?;

    tracing::info!(company_number = %company_number, status = status.as_u16(), "Registry lookup");
    Ok((status, Json(body)).into_response())
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
