//! Test utilities and helpers: database setup/teardown and mock data
//! factories.

use crate::db::AppState;
use crate::models::{Difficulty, GenerationRequest, Workout};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing.
/// Runs all migrations and returns a ready-to-use pool.
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// App state over a fresh in-memory database.
pub async fn setup_test_state() -> AppState {
  AppState::new(setup_test_db().await)
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a minimal valid workout for store tests.
pub fn sample_workout(name: &str) -> Workout {
  Workout::new(
    name.to_string(),
    "A sample workout used in tests.".to_string(),
    30,
    Difficulty::Intermediate,
    vec!["Squats".to_string(), "Push-ups".to_string()],
    vec!["Legs".to_string(), "Chest".to_string()],
    250,
  )
}

/// Create a typical generation request for orchestration tests.
pub fn sample_request() -> GenerationRequest {
  GenerationRequest {
    goals: vec!["strength".to_string()],
    fitness_level: Difficulty::Beginner,
    available_time_minutes: 30,
    equipment: vec!["dumbbells".to_string()],
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'documents'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1, "documents table should exist");

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let workout = sample_workout("Factory Check");
    assert_eq!(workout.name, "Factory Check");
    assert!(!workout.exercises.is_empty());
    assert!(workout.duration_minutes > 0);

    let request = sample_request();
    assert_eq!(request.fitness_level, Difficulty::Beginner);
    assert!(!request.equipment.is_empty());
  }
}
