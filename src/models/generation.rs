use super::workout::Difficulty;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Parameters for one generation attempt. Consumed per attempt, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
  pub goals: Vec<String>,
  pub fitness_level: Difficulty,
  pub available_time_minutes: u32,
  pub equipment: Vec<String>,
}

/// Which path produced the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GenerationSource {
  Remote,
  Fallback,
}

/// A usable generation result. Callers may treat both sources as equivalent;
/// the tag is kept so logging can tell the paths apart.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
  pub source: GenerationSource,
  pub text: String,
}

/// Published state of the current generation request, observed by the UI.
#[derive(Debug, Clone, Serialize, Default)]
pub enum GenerationPhase {
  #[default]
  Idle,
  Requesting,
  Success {
    source: GenerationSource,
    text: String,
  },
  Failed {
    message: String,
  },
}

/// Holder for the generation phase. Single writer (the orchestration layer);
/// observers read cloned snapshots. Injected through `AppState` rather than
/// living in a global.
#[derive(Debug, Default)]
pub struct GenerationState {
  phase: Mutex<GenerationPhase>,
}

impl GenerationState {
  pub fn set(&self, phase: GenerationPhase) {
    *self.lock() = phase;
  }

  pub fn snapshot(&self) -> GenerationPhase {
    self.lock().clone()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, GenerationPhase> {
    // A poisoned lock only means a writer panicked mid-update; the phase
    // value itself is still a valid enum, so recover it.
    self.phase.lock().unwrap_or_else(|e| e.into_inner())
  }
}
