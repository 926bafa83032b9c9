//! Public landing-page content endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::AppState;

/// Header naming where the snapshot came from (`store` or `fallback`)
pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

/// GET /api/content
///
/// Always 200: section failures degrade to empty sections and a missing
/// hero degrades to the placeholder snapshot. Image references are resolved
/// to public URLs.
pub async fn get_content(State(state): State<AppState>) -> Response {
    let (mut snapshot, source) = state.aggregator.snapshot_with_source().await;
    snapshot.resolve_images(&state.storage);

    (
        [
            (header::CACHE_CONTROL, "no-store"),
            (
                header::HeaderName::from_static(CONTENT_SOURCE_HEADER),
                source.as_str(),
            ),
        ],
        Json(snapshot),
    )
        .into_response()
}
