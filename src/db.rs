//! Sqlite-backed persistence and shared application state.
//!
//! Storage is a key-value document table: every logical document is one JSON
//! value, always read and rewritten whole. There are no partial updates and
//! no cross-writer guarantees beyond sqlite's own.

use crate::models::GenerationState;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub type DbPool = SqlitePool;

/// Application state handed to the command layer by the embedding shell.
pub struct AppState {
  pub db: DbPool,
  pub generation: GenerationState,
}

impl AppState {
  pub fn new(db: DbPool) -> Self {
    Self {
      db,
      generation: GenerationState::default(),
    }
  }
}

/// Initialize the database at the given path and run migrations.
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, Box<dyn std::error::Error>> {
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!(path = %db_path.display(), "database ready");

  Ok(pool)
}

/// ---------------------------------------------------------------------------
/// Document Access
/// ---------------------------------------------------------------------------

/// Read a whole document by key. Absent keys are `None`.
pub async fn read_document(db: &DbPool, key: &str) -> Result<Option<String>, sqlx::Error> {
  sqlx::query_scalar("SELECT value FROM documents WHERE key = ?1")
    .bind(key)
    .fetch_optional(db)
    .await
}

/// Overwrite a whole document under its key.
pub async fn write_document(db: &DbPool, key: &str, value: &str) -> Result<(), sqlx::Error> {
  sqlx::query(
    r#"
    INSERT INTO documents (key, value, updated_at)
    VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET
      value = excluded.value,
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(key)
  .bind(value)
  .execute(db)
  .await?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db};
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  async fn test_document_write_read_overwrite() {
    let pool = setup_test_db().await;

    assert_eq!(read_document(&pool, "missing").await.unwrap(), None);

    write_document(&pool, "doc", "first").await.unwrap();
    assert_eq!(
      read_document(&pool, "doc").await.unwrap(),
      Some("first".to_string())
    );

    write_document(&pool, "doc", "second").await.unwrap();
    assert_eq!(
      read_document(&pool, "doc").await.unwrap(),
      Some("second".to_string())
    );

    teardown_test_db(pool).await;
  }
}
