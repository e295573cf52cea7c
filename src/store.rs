//! Persisted workout list, newest first, stored as a single JSON document.
//!
//! Every mutation is a whole-document read-modify-write under one key.
//! Single-writer assumption: this is a single-user local store.

use crate::db::{self, DbPool};
use crate::extraction;
use crate::models::{Difficulty, Workout};
use chrono::Utc;
use thiserror::Error;

const STORE_KEY: &str = "saved_workouts";

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Failed to serialize workouts: {0}")]
  Serialize(String),

  #[error("Database error: {0}")]
  Database(String),
}

pub struct WorkoutStore<'a> {
  db: &'a DbPool,
}

impl<'a> WorkoutStore<'a> {
  pub fn new(db: &'a DbPool) -> Self {
    Self { db }
  }

  /// All saved workouts, newest first. An absent or unreadable document is
  /// replaced by the seed set; callers never see a failure.
  pub async fn list_all(&self) -> Vec<Workout> {
    match db::read_document(self.db, STORE_KEY).await {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<Workout>>(&raw) {
        Ok(workouts) => workouts,
        Err(e) => {
          tracing::warn!(error = %e, "stored workout document unreadable, serving seed data");
          seed_workouts()
        }
      },
      Ok(None) => seed_workouts(),
      Err(e) => {
        tracing::warn!(error = %e, "failed to read workout document, serving seed data");
        seed_workouts()
      }
    }
  }

  /// Prepend a workout and rewrite the document. Returns the workout
  /// unchanged; the id is assigned by the caller, not here.
  pub async fn save(&self, workout: Workout) -> Result<Workout, StoreError> {
    let mut workouts = self.list_all().await;
    workouts.insert(0, workout.clone());
    self.write_all(&workouts).await?;
    Ok(workout)
  }

  /// Extract a structured workout from raw text, then save it.
  pub async fn save_from_text(&self, text: &str) -> Result<Workout, StoreError> {
    self.save(extraction::extract_workout(text)).await
  }

  /// Remove the workout with the given id. A missing id is a no-op.
  pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
    let mut workouts = self.list_all().await;
    if let Some(pos) = workouts.iter().position(|w| w.id == id) {
      workouts.remove(pos);
      self.write_all(&workouts).await?;
    }
    Ok(())
  }

  /// Record a completion: bump the counter and stamp the time. A missing id
  /// is a no-op.
  pub async fn mark_completed(&self, id: &str) -> Result<(), StoreError> {
    let mut workouts = self.list_all().await;
    if let Some(workout) = workouts.iter_mut().find(|w| w.id == id) {
      workout.completion_count += 1;
      workout.last_completed = Some(Utc::now());
      self.write_all(&workouts).await?;
    }
    Ok(())
  }

  async fn write_all(&self, workouts: &[Workout]) -> Result<(), StoreError> {
    let raw =
      serde_json::to_string(workouts).map_err(|e| StoreError::Serialize(e.to_string()))?;
    db::write_document(self.db, STORE_KEY, &raw)
      .await
      .map_err(|e| StoreError::Database(e.to_string()))
  }
}

/// Fixed samples served when the store is empty or unreadable.
fn seed_workouts() -> Vec<Workout> {
  vec![
    Workout::new(
      "Morning Energizer".to_string(),
      "A quick full body wake-up you can do beside the bed.".to_string(),
      20,
      Difficulty::Beginner,
      vec![
        "Jumping Jacks".to_string(),
        "Squats".to_string(),
        "Push-ups".to_string(),
        "Plank".to_string(),
      ],
      vec!["Full Body".to_string()],
      150,
    ),
    Workout::new(
      "Lunch Break Burner".to_string(),
      "A short cardio circuit that fits inside a lunch break.".to_string(),
      30,
      Difficulty::Intermediate,
      vec![
        "High Knees".to_string(),
        "Burpees".to_string(),
        "Mountain Climbers".to_string(),
        "Jump Squats".to_string(),
        "Plank".to_string(),
      ],
      vec!["Cardio".to_string(), "Legs".to_string()],
      250,
    ),
    Workout::new(
      "Evening Strength".to_string(),
      "Classic strength staples to close out the day.".to_string(),
      45,
      Difficulty::Advanced,
      vec![
        "Deadlifts".to_string(),
        "Bench Press".to_string(),
        "Bent-Over Rows".to_string(),
        "Overhead Press".to_string(),
        "Pull-ups".to_string(),
        "Lunges".to_string(),
      ],
      vec!["Back".to_string(), "Chest".to_string(), "Legs".to_string()],
      350,
    ),
  ]
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
