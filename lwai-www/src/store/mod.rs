//! Section store
//!
//! The aggregator and the admin API reach the backing tables only through
//! [`SectionStore`], so either can run against SQLite or a test double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lwai_common::models::{self, Record, ROW_KEYS};
use lwai_common::Section;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

mod sqlite;

pub use sqlite::SqliteSectionStore;

/// Store failures
///
/// "No active row" is not an error: singleton reads return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row addressed by id does not exist
    #[error("{section} row not found: {id}")]
    NotFound { section: Section, id: String },

    /// Backend failure (connectivity, missing table, bad query)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored document does not match the section's record type
    #[error("Malformed {section} row {id}: {reason}")]
    Decode {
        section: Section,
        id: String,
        reason: String,
    },

    /// Read did not complete within the configured bound
    #[error("{section} read timed out after {}ms", .after.as_millis())]
    Timeout { section: Section, after: Duration },

    /// Write payload rejected before reaching the backend
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// One stored row of a section table
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRow {
    pub id: String,
    pub sort_order: i64,
    pub is_active: bool,
    /// Section-specific fields
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SectionRow {
    /// Decode the field document into the section's typed record
    pub fn into_record<T: DeserializeOwned>(self, section: Section) -> Result<Record<T>, StoreError> {
        match models::decode_fields::<T>(section, &self.fields) {
            Ok(fields) => Ok(Record {
                id: self.id,
                sort_order: self.sort_order,
                fields,
            }),
            Err(e) => Err(StoreError::Decode {
                section,
                id: self.id,
                reason: e.to_string(),
            }),
        }
    }

    /// Flat JSON view used by the admin API: row keys plus fields
    pub fn to_json(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert("sort_order".to_string(), Value::from(self.sort_order));
        map.insert("is_active".to_string(), Value::Bool(self.is_active));
        map.insert(
            "created_at".to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        map.insert(
            "updated_at".to_string(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        Value::Object(map)
    }
}

/// An insert-or-update request for one row
#[derive(Debug, Clone, PartialEq)]
pub struct SectionWrite {
    /// Row to update; `None` inserts (or, for singletons, updates the active row)
    pub id: Option<String>,
    /// `None` keeps the existing order on update and appends on insert
    pub sort_order: Option<i64>,
    pub is_active: bool,
    pub fields: Map<String, Value>,
}

impl SectionWrite {
    /// Parse a flat admin payload: row keys are split off, the remaining
    /// fields must match the section's record type
    pub fn from_json(section: Section, body: Value) -> Result<Self, StoreError> {
        let Value::Object(mut map) = body else {
            return Err(StoreError::InvalidInput(
                "request body must be a JSON object".to_string(),
            ));
        };

        let id = match map.remove("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                return Err(StoreError::InvalidInput(format!(
                    "id must be a string, got {}",
                    other
                )))
            }
        };

        let sort_order = match map.remove("sort_order") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.as_i64().ok_or_else(|| {
                StoreError::InvalidInput(format!("sort_order must be an integer, got {}", v))
            })?),
        };

        let is_active = match map.remove("is_active") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                return Err(StoreError::InvalidInput(format!(
                    "is_active must be a boolean, got {}",
                    other
                )))
            }
        };

        for key in ROW_KEYS {
            map.remove(key);
        }

        models::validate_fields(section, &map)
            .map_err(|e| StoreError::InvalidInput(e.to_string()))?;

        Ok(Self {
            id,
            sort_order,
            is_active,
            fields: map,
        })
    }
}

/// Read/write access to the section tables
#[async_trait]
pub trait SectionStore: Send + Sync {
    /// The active row of a singleton section, if any
    ///
    /// With several active rows the most recently updated one wins.
    async fn read_active(&self, section: Section) -> Result<Option<SectionRow>, StoreError>;

    /// All active rows, ascending by `sort_order`, ties in insertion order
    ///
    /// Rows whose stored document cannot be parsed are skipped, not fatal.
    async fn read_active_ordered(&self, section: Section) -> Result<Vec<SectionRow>, StoreError>;

    /// Every row including inactive ones, in the same order
    async fn read_all(&self, section: Section) -> Result<Vec<SectionRow>, StoreError>;

    /// Insert or update one row, returning its id
    async fn upsert(&self, section: Section, write: SectionWrite) -> Result<String, StoreError>;

    /// Remove one row
    async fn delete(&self, section: Section, id: &str) -> Result<(), StoreError>;
}
