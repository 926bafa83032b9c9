//! Admin section CRUD
//!
//! One set of handlers serves every section; the `:section` path segment
//! selects the table. Singletons return their active row, collections
//! return every row (active or not) so hidden items stay editable.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lwai_common::Section;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::store::{SectionWrite, StoreError};
use crate::AppState;

/// DELETE request body
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

fn parse_section(slug: &str) -> Result<Section, AdminError> {
    Section::from_slug(slug).ok_or_else(|| AdminError::UnknownSection(slug.to_string()))
}

/// GET /api/admin/:section
pub async fn get_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AdminError> {
    let section = parse_section(&slug)?;

    let body = if section.is_singleton() {
        state
            .store
            .read_active(section)
            .await?
            .map(|row| row.to_json())
            .unwrap_or(Value::Null)
    } else {
        let rows = state.store.read_all(section).await?;
        Value::Array(rows.iter().map(|row| row.to_json()).collect())
    };

    Ok(Json(body))
}

/// POST /api/admin/:section
///
/// Body is the flat record plus optional `id`, `sort_order`, `is_active`.
pub async fn upsert_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AdminError> {
    let section = parse_section(&slug)?;
    let Json(body) = body?;
    let write = SectionWrite::from_json(section, body)?;

    let id = state.store.upsert(section, write).await?;
    info!(section = %section, id = %id, "Saved section row");

    Ok(Json(json!({ "success": true, "id": id })))
}

/// DELETE /api/admin/:section
pub async fn delete_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    request: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<Value>, AdminError> {
    let section = parse_section(&slug)?;
    let Json(request) = request?;

    state.store.delete(section, &request.id).await?;
    info!(section = %section, id = %request.id, "Deleted section row");

    Ok(Json(json!({ "success": true })))
}

/// Admin API errors
#[derive(Debug)]
pub enum AdminError {
    UnknownSection(String),
    InvalidBody(String),
    NotFound(String),
    Store(String),
}

impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        AdminError::InvalidBody(rejection.body_text())
    }
}

impl From<StoreError> for AdminError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => AdminError::NotFound(e.to_string()),
            StoreError::InvalidInput(msg) => AdminError::InvalidBody(msg),
            other => {
                error!(error = %other, "Section store failure");
                AdminError::Store(other.to_string())
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AdminError::UnknownSection(slug) => {
                (StatusCode::NOT_FOUND, format!("Unknown section: {}", slug))
            }
            AdminError::InvalidBody(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request: {}", msg))
            }
            AdminError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AdminError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
