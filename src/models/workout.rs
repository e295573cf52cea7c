use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty of a workout. The same scale doubles as the user's fitness
/// level in generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
  Beginner,
  #[default]
  Intermediate,
  Advanced,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Beginner => "Beginner",
      Difficulty::Intermediate => "Intermediate",
      Difficulty::Advanced => "Advanced",
    }
  }

  /// Case-insensitive parse; anything unrecognized is None.
  pub fn parse(s: &str) -> Option<Self> {
    match s.to_lowercase().as_str() {
      "beginner" => Some(Difficulty::Beginner),
      "intermediate" => Some(Difficulty::Intermediate),
      "advanced" => Some(Difficulty::Advanced),
      _ => None,
    }
  }
}

/// A workout as it appears in the persisted document.
///
/// Field names and value encodings must round-trip exactly against
/// previously stored data, so the serde attributes here are load-bearing.
/// Timestamps are epoch milliseconds on the wire. Documents written by older
/// builds may lack the bookkeeping fields and may carry fields this build
/// does not know about; both must deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
  pub id: String,
  pub name: String,
  pub description: String,
  #[serde(rename = "duration")]
  pub duration_minutes: u32,
  pub difficulty: Difficulty,
  pub exercises: Vec<String>,
  pub target_muscle_groups: Vec<String>,
  pub calories_estimate: u32,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub date_generated: DateTime<Utc>,
  #[serde(default)]
  pub completion_count: u32,
  #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
  pub last_completed: Option<DateTime<Utc>>,
}

impl Workout {
  /// Create a workout with a fresh id and creation timestamp.
  pub fn new(
    name: String,
    description: String,
    duration_minutes: u32,
    difficulty: Difficulty,
    exercises: Vec<String>,
    target_muscle_groups: Vec<String>,
    calories_estimate: u32,
  ) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      name,
      description,
      duration_minutes,
      difficulty,
      exercises,
      target_muscle_groups,
      calories_estimate,
      date_generated: Utc::now(),
      completion_count: 0,
      last_completed: None,
    }
  }
}
