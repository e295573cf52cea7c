//! Async entry points for the embedding UI shell.
//!
//! These mirror what a shell binds to directly: thin wrappers over the store
//! and the generation flow, with internal errors mapped to user-facing
//! strings.

pub mod generate;

use crate::db::AppState;
use crate::models::Workout;
use crate::store::WorkoutStore;

/// All saved workouts, newest first. Never fails; storage problems degrade
/// to the seed set.
pub async fn get_workouts(state: &AppState) -> Vec<Workout> {
  WorkoutStore::new(&state.db).list_all().await
}

/// Extract a structured workout from raw generated text and persist it.
pub async fn save_workout_from_text(state: &AppState, text: &str) -> Result<Workout, String> {
  WorkoutStore::new(&state.db)
    .save_from_text(text)
    .await
    .map_err(|e| format!("Failed to save workout: {}", e))
}

pub async fn delete_workout(state: &AppState, id: &str) -> Result<(), String> {
  WorkoutStore::new(&state.db)
    .delete(id)
    .await
    .map_err(|e| format!("Failed to delete workout: {}", e))
}

pub async fn mark_workout_completed(state: &AppState, id: &str) -> Result<(), String> {
  WorkoutStore::new(&state.db)
    .mark_completed(id)
    .await
    .map_err(|e| format!("Failed to record completion: {}", e))
}
