//! # lwai common library
//!
//! Shared code for the landing-page content service:
//! - Section catalogue and typed section records
//! - Configuration loading
//! - Database initialization
//! - Image reference resolution
//! - Admin session token helpers

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod sections;
pub mod storage;

pub use error::{Error, Result};
pub use sections::{Section, SectionShape};
pub use storage::StorageConfig;
