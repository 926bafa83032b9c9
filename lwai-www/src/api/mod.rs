//! HTTP API handlers for lwai-www

pub mod admin;
pub mod auth;
pub mod buildinfo;
pub mod content;
pub mod health;

pub use admin::{delete_section, get_section, upsert_section};
pub use auth::{login, logout, require_admin};
pub use buildinfo::get_build_info;
pub use content::get_content;
pub use health::health_routes;
