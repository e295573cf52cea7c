//! Core of an AI workout companion app.
//!
//! Turns free-form AI prose into validated workout records, synthesizes a
//! deterministic workout when no AI is available, persists saved workouts as
//! a single JSON document, and orchestrates the remote-then-fallback
//! generation flow behind async commands a UI shell can bind to.

pub mod commands;
pub mod db;
pub mod extraction;
pub mod fallback;
pub mod llm;
pub mod models;
pub mod store;

#[cfg(test)]
mod test_utils;

use std::path::Path;
use std::sync::Arc;

/// Initialize shared state for an embedding shell: load environment
/// variables, open the database, run migrations.
pub async fn init(db_path: &Path) -> Result<Arc<db::AppState>, Box<dyn std::error::Error>> {
  dotenvy::dotenv().ok();

  let pool = db::initialize_db(db_path).await?;

  Ok(Arc::new(db::AppState::new(pool)))
}
