//! Workout generation orchestration: remote AI first, deterministic fallback
//! always.
//!
//! Generation never surfaces a failure to the caller; the connectivity
//! diagnostic is the one flow that does, with a categorized message.

use crate::db::AppState;
use crate::fallback;
use crate::llm::{ClaudeClient, LlmError};
use crate::models::{
  GenerationOutcome, GenerationPhase, GenerationRequest, GenerationSource, Workout,
};
use crate::store::WorkoutStore;

/// ---------------------------------------------------------------------------
/// User-Facing Failure Messages (connectivity diagnostic only)
/// ---------------------------------------------------------------------------

const MSG_AUTH: &str = "Your AI access could not be verified. Check the API key in settings.";
const MSG_RATE_LIMIT: &str = "The AI service is busy right now. Wait a moment and try again.";
const MSG_NETWORK: &str = "Could not reach the AI service. Check your internet connection.";
const MSG_TIMEOUT: &str = "The AI service took too long to respond. Try again.";
const MSG_GENERIC: &str = "Something went wrong talking to the AI service. Try again later.";

/// Map a raw failure reason onto the message shown by the connectivity
/// screen. Matched in order; first hit wins.
pub fn user_message_for_failure(reason: &str) -> &'static str {
  let reason = reason.to_lowercase();
  if reason.contains("authentication") {
    MSG_AUTH
  } else if reason.contains("rate limit") {
    MSG_RATE_LIMIT
  } else if reason.contains("network") || reason.contains("connection") {
    MSG_NETWORK
  } else if reason.contains("timeout") {
    MSG_TIMEOUT
  } else {
    MSG_GENERIC
  }
}

/// ---------------------------------------------------------------------------
/// Generation Flow
/// ---------------------------------------------------------------------------

/// Generate workout text for a request. The remote collaborator is tried
/// only when configured; any failure is logged and routed to the fallback,
/// so the caller always receives usable text and the published phase always
/// ends in Success.
pub async fn generate_workout(
  state: &AppState,
  request: &GenerationRequest,
) -> GenerationOutcome {
  state.generation.set(GenerationPhase::Requesting);

  let outcome = match remote_workout_text(request).await {
    Some(text) => GenerationOutcome {
      source: GenerationSource::Remote,
      text,
    },
    None => GenerationOutcome {
      source: GenerationSource::Fallback,
      text: fallback::generate_fallback(request),
    },
  };

  state.generation.set(GenerationPhase::Success {
    source: outcome.source,
    text: outcome.text.clone(),
  });

  outcome
}

/// Remote path, collapsing "not configured" and "failed" into None.
async fn remote_workout_text(request: &GenerationRequest) -> Option<String> {
  if !ClaudeClient::is_configured() {
    tracing::info!("remote generator not configured, using fallback");
    return None;
  }

  let client = match ClaudeClient::from_env() {
    Ok(client) => client,
    Err(e) => {
      tracing::warn!(error = %e, "remote generator unavailable, using fallback");
      return None;
    }
  };

  match client.generate_workout_text(request).await {
    Ok(text) => Some(text),
    Err(e) => {
      tracing::warn!(error = %e, "remote generation failed, using fallback");
      None
    }
  }
}

/// Generate, extract, and persist in one step.
pub async fn generate_and_save(
  state: &AppState,
  request: &GenerationRequest,
) -> Result<Workout, String> {
  let outcome = generate_workout(state, request).await;
  WorkoutStore::new(&state.db)
    .save_from_text(&outcome.text)
    .await
    .map_err(|e| format!("Failed to save generated workout: {}", e))
}

/// ---------------------------------------------------------------------------
/// Connectivity Diagnostic
/// ---------------------------------------------------------------------------

/// Round-trip check against the remote collaborator. Unlike generation this
/// does NOT fall back: failures surface as a categorized user-facing message.
pub async fn test_connection() -> Result<String, String> {
  let client = match ClaudeClient::from_env() {
    Ok(client) => client,
    Err(LlmError::MissingApiKey) => return Err(MSG_AUTH.to_string()),
    Err(e) => return Err(user_message_for_failure(&e.to_string()).to_string()),
  };

  match client.ping().await {
    Ok(reply) => Ok(reply),
    Err(e) => {
      let reason = e.to_string();
      tracing::warn!(error = %reason, "connectivity test failed");
      Err(user_message_for_failure(&reason).to_string())
    }
  }
}

/// ---------------------------------------------------------------------------
/// Form Tips
/// ---------------------------------------------------------------------------

/// Fixed guidance used when the remote collaborator cannot help.
const GENERIC_FORM_TIPS: &str = "Move through the full range of motion with control.\n\
Brace your core and keep your spine neutral.\n\
Breathe out on the effort and never train through sharp pain.";

/// Short form guidance for one exercise. Same silent-fallback policy as
/// generation: the user always gets usable tips.
pub async fn form_tips(exercise: &str) -> String {
  if ClaudeClient::is_configured() {
    if let Ok(client) = ClaudeClient::from_env() {
      match client.form_tips_text(exercise).await {
        Ok(text) => return text,
        Err(e) => {
          tracing::warn!(error = %e, exercise, "form tips request failed, using static tips");
        }
      }
    }
  }
  GENERIC_FORM_TIPS.to_string()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Difficulty;
  use crate::test_utils::{sample_request, setup_test_state, teardown_test_db};
  use serial_test::serial;

  #[test]
  fn test_failure_messages_are_categorized() {
    assert_eq!(
      user_message_for_failure("API error: authentication failed"),
      MSG_AUTH
    );
    assert_eq!(
      user_message_for_failure("Rate limit exceeded for requests"),
      MSG_RATE_LIMIT
    );
    assert_eq!(
      user_message_for_failure("error sending request: network unreachable"),
      MSG_NETWORK
    );
    assert_eq!(
      user_message_for_failure("connection refused"),
      MSG_NETWORK
    );
    assert_eq!(
      user_message_for_failure("operation timeout after 30s"),
      MSG_TIMEOUT
    );
    assert_eq!(user_message_for_failure("the sky is falling"), MSG_GENERIC);
  }

  #[test]
  fn test_failure_message_order_first_hit_wins() {
    // Contains both keywords; "authentication" is checked first.
    assert_eq!(
      user_message_for_failure("authentication hit a rate limit"),
      MSG_AUTH
    );
  }

  #[tokio::test]
  #[serial]
  async fn test_unconfigured_generation_uses_fallback_and_ends_success() {
    std::env::remove_var("ANTHROPIC_API_KEY");
    let state = setup_test_state().await;

    let request = sample_request();
    let outcome = generate_workout(&state, &request).await;

    assert_eq!(outcome.source, GenerationSource::Fallback);
    assert!(outcome.text.contains("Level: Beginner"));

    match state.generation.snapshot() {
      GenerationPhase::Success { source, text } => {
        assert_eq!(source, GenerationSource::Fallback);
        assert_eq!(text, outcome.text);
      }
      other => panic!("expected Success, got {:?}", other),
    }

    teardown_test_db(state.db.clone()).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_generate_and_save_persists_extracted_workout() {
    std::env::remove_var("ANTHROPIC_API_KEY");
    let state = setup_test_state().await;

    let request = sample_request();
    let saved = generate_and_save(&state, &request).await.unwrap();

    assert_eq!(saved.duration_minutes, request.available_time_minutes);
    assert_eq!(saved.difficulty, Difficulty::Beginner);

    let workouts = WorkoutStore::new(&state.db).list_all().await;
    assert_eq!(workouts[0].id, saved.id);

    teardown_test_db(state.db.clone()).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_connection_without_key_maps_to_auth_message() {
    std::env::remove_var("ANTHROPIC_API_KEY");

    let result = test_connection().await;
    assert_eq!(result.unwrap_err(), MSG_AUTH);
  }

  #[tokio::test]
  #[serial]
  async fn test_form_tips_fall_back_to_static_text() {
    std::env::remove_var("ANTHROPIC_API_KEY");

    let tips = form_tips("Goblet Squats").await;
    assert!(tips.contains("full range of motion"));
  }
}
