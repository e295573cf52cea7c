//! Best-effort extraction of structured workouts from AI-generated prose.
//!
//! Every field is recovered by an independent heuristic with an explicit
//! default, so malformed input is never an error. The only cross-field
//! dependency is deliberate: when no duration is stated, it is inferred from
//! how many exercises were found.

use crate::models::{Difficulty, Workout};
use regex::Regex;
use std::sync::LazyLock;

/// ---------------------------------------------------------------------------
/// Extraction Rules
/// ---------------------------------------------------------------------------

const NAME_MAX_CHARS: usize = 60;
const DESCRIPTION_MAX_CHARS: usize = 120;
const MAX_EXERCISES: usize = 10;
const MAX_MUSCLE_GROUPS: usize = 3;
const MIN_EXERCISE_CHARS: usize = 4;

const DEFAULT_NAME: &str = "AI Generated Workout";
const DEFAULT_DESCRIPTION: &str = "A personalized workout created just for you.";
const DEFAULT_EXERCISES: [&str; 4] = ["Push-ups", "Squats", "Plank", "Jumping Jacks"];
const DEFAULT_MUSCLE_GROUP: &str = "Full Body";

/// Muscle vocabulary: lowercase match key and the canonical label reported
/// to callers. Matched on word boundaries, case-insensitively.
const MUSCLE_VOCABULARY: [(&str, &str); 12] = [
  ("chest", "Chest"),
  ("back", "Back"),
  ("legs", "Legs"),
  ("arms", "Arms"),
  ("shoulders", "Shoulders"),
  ("core", "Core"),
  ("abs", "Abs"),
  ("cardio", "Cardio"),
  ("full body", "Full Body"),
  ("glutes", "Glutes"),
  ("biceps", "Biceps"),
  ("triceps", "Triceps"),
];

/// Calorie buckets keyed by final duration: (upper bound inclusive, estimate).
/// Deliberately duration-only; previously stored data depends on these exact
/// boundaries even though duration itself may be inferred from exercise count.
const CALORIE_BUCKETS: [(u32, u32); 3] = [(20, 150), (35, 250), (50, 350)];
const CALORIE_DEFAULT: u32 = 450;

// A title line: optional leading emoji/markers, then a capitalized phrase of
// 10-80 chars that does not cross a line break.
static TITLE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^[^\w\r\n]*([A-Z][^\r\n]{9,79})").unwrap());

// A bulleted exercise line: •, -, ▪ or "1." followed by 5-50 chars.
static BULLET_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:[•▪-]|\d+\.)[ \t]*(.{5,50})").unwrap());

static MUSCLE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)\b(chest|back|legs|arms|shoulders|core|abs|cardio|full body|glutes|biceps|triceps)\b",
  )
  .unwrap()
});

static DURATION_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,4})\s*min").unwrap());

static DIFFICULTY_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\b(beginner|intermediate|advanced)\b").unwrap());

/// ---------------------------------------------------------------------------
/// Entry Point
/// ---------------------------------------------------------------------------

/// Derive a structured workout from free-form text. Never fails: every field
/// falls back to its default when nothing can be confidently extracted.
pub fn extract_workout(text: &str) -> Workout {
  let name = extract_title(text);
  let description = extract_description(text);
  let exercises = extract_exercises(text);
  let target_muscle_groups = extract_muscle_groups(text);
  let difficulty = extract_difficulty(text);
  let duration_minutes =
    extract_duration(text).unwrap_or_else(|| infer_duration(exercises.len()));
  let calories_estimate = estimate_calories(duration_minutes);

  Workout::new(
    name,
    description,
    duration_minutes,
    difficulty,
    exercises,
    target_muscle_groups,
    calories_estimate,
  )
}

/// ---------------------------------------------------------------------------
/// Field Extractors
/// ---------------------------------------------------------------------------

fn extract_title(text: &str) -> String {
  TITLE_RE
    .captures(text)
    .map(|c| truncate_chars(c[1].trim(), NAME_MAX_CHARS))
    .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

fn extract_description(text: &str) -> String {
  text
    .lines()
    .map(str::trim)
    .find(|line| line.chars().count() > 20 && !is_marker_line(line))
    .map(|line| truncate_chars(line, DESCRIPTION_MAX_CHARS))
    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())
}

fn is_marker_line(line: &str) -> bool {
  line.contains(['•', '▪', '#', '*']) || BULLET_RE.is_match(line)
}

fn extract_exercises(text: &str) -> Vec<String> {
  let found: Vec<String> = BULLET_RE
    .captures_iter(text)
    .map(|c| c[1].trim().to_string())
    .filter(|e| e.chars().count() >= MIN_EXERCISE_CHARS)
    .take(MAX_EXERCISES)
    .collect();

  if found.is_empty() {
    DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect()
  } else {
    found
  }
}

/// First-seen document order, deduplicated, capped at three groups.
fn extract_muscle_groups(text: &str) -> Vec<String> {
  let mut groups: Vec<String> = Vec::new();
  for m in MUSCLE_RE.find_iter(text) {
    let canonical = canonical_muscle(m.as_str());
    if !groups.iter().any(|g| g == canonical) {
      groups.push(canonical.to_string());
      if groups.len() == MAX_MUSCLE_GROUPS {
        break;
      }
    }
  }

  if groups.is_empty() {
    vec![DEFAULT_MUSCLE_GROUP.to_string()]
  } else {
    groups
  }
}

fn canonical_muscle(raw: &str) -> &'static str {
  let lower = raw.to_lowercase();
  MUSCLE_VOCABULARY
    .iter()
    .find(|(key, _)| *key == lower)
    .map(|(_, label)| *label)
    .unwrap_or(DEFAULT_MUSCLE_GROUP)
}

fn extract_duration(text: &str) -> Option<u32> {
  DURATION_RE
    .captures_iter(text)
    .filter_map(|c| c[1].parse::<u32>().ok())
    .find(|d| *d > 0)
}

/// Duration inferred from how many exercises were recovered.
fn infer_duration(exercise_count: usize) -> u32 {
  match exercise_count {
    0..=4 => 20,
    5..=6 => 30,
    7..=8 => 45,
    _ => 60,
  }
}

fn extract_difficulty(text: &str) -> Difficulty {
  DIFFICULTY_RE
    .find(text)
    .and_then(|m| Difficulty::parse(m.as_str()))
    .unwrap_or_default()
}

fn estimate_calories(duration_minutes: u32) -> u32 {
  for (upper, estimate) in CALORIE_BUCKETS {
    if duration_minutes <= upper {
      return estimate;
    }
  }
  CALORIE_DEFAULT
}

fn truncate_chars(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    s.chars().take(max).collect()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
