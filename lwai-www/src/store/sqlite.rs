//! SQLite-backed section store
//!
//! One table per section (see `lwai_common::db`). Field documents are kept as
//! JSON text in the `data` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lwai_common::Section;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{SectionRow, SectionStore, SectionWrite, StoreError};

const COLUMNS: &str = "id, data, sort_order, is_active, created_at, updated_at";

/// Section store over a SQLite pool
#[derive(Clone)]
pub struct SqliteSectionStore {
    pool: SqlitePool,
}

impl SqliteSectionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn decode_row(section: Section, row: &SqliteRow) -> Result<SectionRow, StoreError> {
    let id: String = row.try_get("id")?;
    let data: String = row.try_get("data")?;
    let sort_order: i64 = row.try_get("sort_order")?;
    let is_active: bool = row.try_get("is_active")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    let fields = match serde_json::from_str::<Value>(&data) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(StoreError::Decode {
                section,
                id,
                reason: format!("data is not a JSON object: {}", other),
            })
        }
        Err(e) => {
            return Err(StoreError::Decode {
                section,
                id,
                reason: e.to_string(),
            })
        }
    };

    Ok(SectionRow {
        id,
        sort_order,
        is_active,
        fields,
        created_at,
        updated_at,
    })
}

/// Decode a result set; rows whose `data` is not a JSON object are skipped
fn decode_rows(section: Section, rows: &[SqliteRow]) -> Result<Vec<SectionRow>, StoreError> {
    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        match decode_row(section, row) {
            Ok(row) => decoded.push(row),
            Err(e @ StoreError::Decode { .. }) => {
                warn!(section = %section, error = %e, "Skipping undecodable row");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(decoded)
}

fn encode_data(write: &SectionWrite) -> Result<String, StoreError> {
    serde_json::to_string(&write.fields).map_err(|e| StoreError::InvalidInput(e.to_string()))
}

#[async_trait]
impl SectionStore for SqliteSectionStore {
    async fn read_active(&self, section: Section) -> Result<Option<SectionRow>, StoreError> {
        // Most recent write wins if more than one row is active
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE is_active = 1 ORDER BY updated_at DESC, rowid DESC LIMIT 1",
            section.table_name()
        );
        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;
        row.map(|r| decode_row(section, &r)).transpose()
    }

    async fn read_active_ordered(&self, section: Section) -> Result<Vec<SectionRow>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE is_active = 1 ORDER BY sort_order ASC, rowid ASC",
            section.table_name()
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        decode_rows(section, &rows)
    }

    async fn read_all(&self, section: Section) -> Result<Vec<SectionRow>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} ORDER BY sort_order ASC, rowid ASC",
            section.table_name()
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        decode_rows(section, &rows)
    }

    async fn upsert(&self, section: Section, write: SectionWrite) -> Result<String, StoreError> {
        let table = section.table_name();
        let data = encode_data(&write)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // Singletons without an id update the current active row in place
        let target = match write.id.clone() {
            Some(id) => Some(id),
            None if section.is_singleton() => {
                sqlx::query_scalar::<_, String>(&format!(
                    "SELECT id FROM {table} WHERE is_active = 1 ORDER BY updated_at DESC, rowid DESC LIMIT 1"
                ))
                .fetch_optional(&mut *tx)
                .await?
            }
            None => None,
        };

        let id = match target {
            Some(id) => {
                let result = sqlx::query(&format!(
                    "UPDATE {table}
                     SET data = ?, sort_order = COALESCE(?, sort_order), is_active = ?, updated_at = ?
                     WHERE id = ?"
                ))
                .bind(&data)
                .bind(write.sort_order)
                .bind(write.is_active)
                .bind(now)
                .bind(&id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::NotFound { section, id });
                }
                debug!(section = %section, id = %id, "Updated row");
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                sqlx::query(&format!(
                    "INSERT INTO {table} (id, data, sort_order, is_active, created_at, updated_at)
                     VALUES (?, ?, COALESCE(?, (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {table})), ?, ?, ?)"
                ))
                .bind(&id)
                .bind(&data)
                .bind(write.sort_order)
                .bind(write.is_active)
                .bind(now)
                .bind(now)
                .execute(&mut *tx)
                .await?;
                debug!(section = %section, id = %id, "Inserted row");
                id
            }
        };

        // Keep at most one active singleton row
        if section.is_singleton() && write.is_active {
            let result = sqlx::query(&format!(
                "UPDATE {table} SET is_active = 0, updated_at = ? WHERE is_active = 1 AND id != ?"
            ))
            .bind(now)
            .bind(&id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() > 0 {
                debug!(
                    section = %section,
                    deactivated = result.rows_affected(),
                    "Deactivated superseded singleton rows"
                );
            }
        }

        tx.commit().await?;
        Ok(id)
    }

    async fn delete(&self, section: Section, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", section.table_name()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                section,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
