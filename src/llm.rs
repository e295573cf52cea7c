//! Remote AI collaborator for workout text generation.
//!
//! Thin client over the Claude Messages API. The rest of the crate only sees
//! a text-in/text-out contract with a success/failure result; prompt shaping
//! lives here.

use crate::models::GenerationRequest;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";
const CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const WORKOUT_MAX_TOKENS: u32 = 1024;
const TIPS_MAX_TOKENS: u32 = 512;
const PING_MAX_TOKENS: u32 = 32;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LlmError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

/// ---------------------------------------------------------------------------
/// Claude API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ClaudeRequest {
  model: String,
  max_tokens: u32,
  system: String,
  messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
  role: String,
  content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
  content: Vec<ContentBlock>,
  usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  content_type: String,
  text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
  pub input_tokens: u32,
  pub output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
  error: ClaudeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ClaudeErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Claude Client
/// ---------------------------------------------------------------------------

pub struct ClaudeClient {
  client: Client,
  api_key: String,
  api_url: String,
}

impl ClaudeClient {
  /// Create a new client, loading the API key from the environment.
  pub fn from_env() -> Result<Self, LlmError> {
    let api_key = env::var(API_KEY_VAR).map_err(|_| LlmError::MissingApiKey)?;

    Ok(Self {
      client: Client::new(),
      api_key,
      api_url: CLAUDE_API_URL.to_string(),
    })
  }

  /// Whether the remote collaborator is usable at all.
  pub fn is_configured() -> bool {
    env::var(API_KEY_VAR)
      .map(|key| !key.trim().is_empty())
      .unwrap_or(false)
  }

  /// Client pointed at a custom endpoint, for mock servers in tests.
  pub fn with_api_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_key: api_key.into(),
      api_url: api_url.into(),
    }
  }

  /// Call Claude with a system prompt and user message.
  pub async fn complete(
    &self,
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
  ) -> Result<(String, Usage), LlmError> {
    let request = ClaudeRequest {
      model: CLAUDE_MODEL.to_string(),
      max_tokens,
      system: system_prompt.to_string(),
      messages: vec![ClaudeMessage {
        role: "user".to_string(),
        content: user_message.to_string(),
      }],
    };

    let response = self
      .client
      .post(&self.api_url)
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", API_VERSION)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await
      .map_err(|e| LlmError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| LlmError::Request(e.to_string()))?;

    if !status.is_success() {
      // Prefer the structured error message when the body parses
      if let Ok(error_resp) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
        return Err(LlmError::Api(error_resp.error.message));
      }
      return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
    }

    let claude_response: ClaudeResponse =
      serde_json::from_str(&body).map_err(|e| LlmError::Parse(e.to_string()))?;

    let text = claude_response
      .content
      .iter()
      .find(|c| c.content_type == "text")
      .and_then(|c| c.text.clone())
      .ok_or_else(|| LlmError::Parse("No text content in response".to_string()))?;

    Ok((text, claude_response.usage))
  }

  /// Generate free-form workout text for a request.
  pub async fn generate_workout_text(
    &self,
    request: &GenerationRequest,
  ) -> Result<String, LlmError> {
    let system_prompt = include_str!("prompts/coach_system.txt");
    let user_message = build_workout_prompt(request);

    let (text, usage) = self
      .complete(system_prompt, &user_message, WORKOUT_MAX_TOKENS)
      .await?;

    tracing::info!(
      input_tokens = usage.input_tokens,
      output_tokens = usage.output_tokens,
      "generated workout text"
    );

    Ok(text)
  }

  /// Short form guidance for a single exercise.
  pub async fn form_tips_text(&self, exercise: &str) -> Result<String, LlmError> {
    let system_prompt = include_str!("prompts/coach_system.txt");
    let user_message = format!(
      "Give three short form tips for performing {} safely. Plain text, one tip per line.",
      exercise
    );

    let (text, _usage) = self
      .complete(system_prompt, &user_message, TIPS_MAX_TOKENS)
      .await?;

    Ok(text)
  }

  /// Minimal round-trip used by the connectivity diagnostic.
  pub async fn ping(&self) -> Result<String, LlmError> {
    let (text, _usage) = self
      .complete(
        "You are a connectivity check.",
        "Reply with the single word OK.",
        PING_MAX_TOKENS,
      )
      .await?;

    Ok(text)
  }
}

/// Shape the user message so responses come back in an extraction-friendly
/// layout (title line, bullets, stated duration and difficulty).
fn build_workout_prompt(request: &GenerationRequest) -> String {
  let goals = if request.goals.is_empty() {
    "general fitness".to_string()
  } else {
    request.goals.join(", ")
  };
  let equipment = if request.equipment.is_empty() {
    "none".to_string()
  } else {
    request.equipment.join(", ")
  };

  format!(
    "Create a personalized workout plan.\n\n\
     Goals: {}\n\
     Fitness level: {}\n\
     Time available: {} minutes\n\
     Equipment: {}",
    goals,
    request.fitness_level.as_str(),
    request.available_time_minutes,
    equipment
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
