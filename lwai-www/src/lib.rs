//! lwai-www library - landing-page content service
//!
//! Serves the aggregated landing-page snapshot and a JSON admin API for
//! editing each section, with the admin routes behind a password cookie.

use axum::Router;
use chrono::{DateTime, Utc};
use lwai_common::auth;
use lwai_common::config::SiteConfig;
use lwai_common::StorageConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod content;
pub mod store;

use content::ContentAggregator;
use store::SectionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Section tables
    pub store: Arc<dyn SectionStore>,
    /// Landing snapshot builder over the same store
    pub aggregator: Arc<ContentAggregator>,
    /// Public bucket location for image URLs
    pub storage: StorageConfig,
    /// Configured admin password; `None` disables admin login
    pub admin_password: Option<Arc<str>>,
    /// Expected `admin-session` cookie value
    pub session_token: Option<Arc<str>>,
    /// Startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<dyn SectionStore>,
        storage: StorageConfig,
        admin_password: Option<String>,
    ) -> Self {
        let admin_password = admin_password.filter(|p| !p.is_empty());
        let session_token = admin_password.as_deref().map(|p| Arc::from(auth::session_token(p)));

        Self {
            aggregator: Arc::new(ContentAggregator::new(Arc::clone(&store))),
            store,
            storage,
            admin_password: admin_password.map(Arc::from),
            session_token,
            startup_time: Utc::now(),
        }
    }

    /// Create state from resolved configuration
    pub fn from_config(store: Arc<dyn SectionStore>, config: &SiteConfig) -> Self {
        Self::new(store, config.storage.clone(), config.admin_password.clone())
            .with_read_timeout(config.section_read_timeout_ms.map(Duration::from_millis))
    }

    /// Bound every aggregator section read
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.aggregator = Arc::new(
            ContentAggregator::new(Arc::clone(&self.store)).with_read_timeout(timeout),
        );
        self
    }
}

/// Build application router
///
/// Public: content snapshot, health, build info, admin login/logout.
/// Protected: per-section admin CRUD.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require admin session)
    let protected = Router::new()
        .route(
            "/api/admin/:section",
            get(api::get_section)
                .post(api::upsert_section)
                .delete(api::delete_section),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_admin,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/content", get(api::get_content))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/admin/auth", post(api::login).delete(api::logout))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
