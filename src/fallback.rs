//! Deterministic workout synthesis for when the remote generator is
//! unavailable or unconfigured.
//!
//! Pure function of the request: identical inputs always produce
//! byte-identical text. The output is shaped so the extraction engine can
//! recover the title, exercises, duration and difficulty from it.

use crate::models::{Difficulty, GenerationRequest};

/// ---------------------------------------------------------------------------
/// Exercise Blocks
/// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Effort {
  Reps,
  Timed,
}

struct ExerciseTemplate {
  name: &'static str,
  effort: Effort,
}

const fn ex(name: &'static str, effort: Effort) -> ExerciseTemplate {
  ExerciseTemplate { name, effort }
}

struct Block {
  title: &'static str,
  description: &'static str,
  exercises: [ExerciseTemplate; 4],
}

const WEIGHTED_STRENGTH: Block = Block {
  title: "Strength Builder",
  description: "A weighted strength session for steady full body progress.",
  exercises: [
    ex("Goblet Squats", Effort::Reps),
    ex("Bent-Over Rows", Effort::Reps),
    ex("Overhead Press", Effort::Reps),
    ex("Romanian Deadlifts", Effort::Reps),
  ],
};

const BAND_STRENGTH: Block = Block {
  title: "Band Strength",
  description: "A resistance band strength session that works the full body anywhere.",
  exercises: [
    ex("Band Squats", Effort::Reps),
    ex("Band Rows", Effort::Reps),
    ex("Band Chest Press", Effort::Reps),
    ex("Band Pull-Aparts", Effort::Reps),
  ],
};

const BODYWEIGHT_STRENGTH: Block = Block {
  title: "Bodyweight Strength",
  description: "A no-equipment strength session hitting chest, legs and core.",
  exercises: [
    ex("Push-ups", Effort::Reps),
    ex("Pike Push-ups", Effort::Reps),
    ex("Split Squats", Effort::Reps),
    ex("Plank Hold", Effort::Timed),
  ],
};

const CARDIO: Block = Block {
  title: "Cardio Blast",
  description: "A high-energy cardio circuit to build endurance and burn calories.",
  exercises: [
    ex("Jumping Jacks", Effort::Timed),
    ex("High Knees", Effort::Timed),
    ex("Mountain Climbers", Effort::Timed),
    ex("Burpees", Effort::Reps),
  ],
};

const WEIGHT_LOSS: Block = Block {
  title: "Fat Burn Circuit",
  description: "A full body circuit built to burn fat and keep your heart rate up.",
  exercises: [
    ex("Squats", Effort::Reps),
    ex("Jumping Jacks", Effort::Timed),
    ex("Alternating Lunges", Effort::Reps),
    ex("Plank", Effort::Timed),
  ],
};

const GENERAL: Block = Block {
  title: "Full Body Fitness",
  description: "A balanced full body session covering strength, core and cardio.",
  exercises: [
    ex("Push-ups", Effort::Reps),
    ex("Squats", Effort::Reps),
    ex("Glute Bridges", Effort::Reps),
    ex("Plank", Effort::Timed),
  ],
};

/// ---------------------------------------------------------------------------
/// Level-Keyed Prescriptions
/// ---------------------------------------------------------------------------

struct LevelPlan {
  reps: &'static str,
  hold: &'static str,
  rounds: u32,
  exercise_rest: &'static str,
  round_rest: &'static str,
  tip: &'static str,
}

const fn level_plan(level: Difficulty) -> LevelPlan {
  match level {
    Difficulty::Beginner => LevelPlan {
      reps: "5-10 reps",
      hold: "20-30s",
      rounds: 2,
      exercise_rest: "60-90s",
      round_rest: "2-3 min",
      tip: "Start light and master each movement before adding load.",
    },
    Difficulty::Intermediate => LevelPlan {
      reps: "10-18 reps",
      hold: "30-45s",
      rounds: 3,
      exercise_rest: "45-60s",
      round_rest: "1.5-2 min",
      tip: "Push the pace but keep two clean reps in reserve.",
    },
    Difficulty::Advanced => LevelPlan {
      reps: "18-25 reps",
      hold: "45-60s",
      rounds: 4,
      exercise_rest: "30-45s",
      round_rest: "1-1.5 min",
      tip: "Take the final round close to failure with clean form.",
    },
  }
}

/// ---------------------------------------------------------------------------
/// Block Selection
/// ---------------------------------------------------------------------------

/// First matching rule wins, in this order: strength with equipment, cardio,
/// weight loss, general fitness.
fn select_block(goals: &[String], equipment: &[String]) -> &'static Block {
  let goals_lower: Vec<String> = goals.iter().map(|g| g.to_lowercase()).collect();
  let goal_mentions = |needle: &str| goals_lower.iter().any(|g| g.contains(needle));

  if goal_mentions("strength") && !equipment.is_empty() {
    let equipment_lower = equipment.join(" ").to_lowercase();
    if equipment_lower.contains("dumbbell") || equipment_lower.contains("barbell") {
      &WEIGHTED_STRENGTH
    } else if equipment_lower.contains("band") {
      &BAND_STRENGTH
    } else {
      &BODYWEIGHT_STRENGTH
    }
  } else if goal_mentions("cardio") || goal_mentions("endurance") {
    &CARDIO
  } else if goal_mentions("weight") || goal_mentions("fat") {
    &WEIGHT_LOSS
  } else {
    &GENERAL
  }
}

/// ---------------------------------------------------------------------------
/// Document Assembly
/// ---------------------------------------------------------------------------

/// Synthesize a complete workout document from explicit parameters. No I/O,
/// no randomness.
pub fn generate_fallback(request: &GenerationRequest) -> String {
  let block = select_block(&request.goals, &request.equipment);
  let plan = level_plan(request.fitness_level);

  let goals = if request.goals.is_empty() {
    "general fitness".to_string()
  } else {
    request.goals.join(", ")
  };
  let equipment = if request.equipment.is_empty() {
    "none listed".to_string()
  } else {
    request.equipment.join(", ")
  };

  let mut out = String::new();
  out.push_str(block.title);
  out.push_str("\n\n");
  out.push_str(block.description);
  out.push_str("\n\n");
  out.push_str(&format!("Goals: {}\n", goals));
  out.push_str(&format!("Level: {}\n", request.fitness_level.as_str()));
  out.push_str(&format!(
    "Time available: {} minutes\n",
    request.available_time_minutes
  ));
  out.push_str(&format!("Equipment: {}\n\n", equipment));

  out.push_str("Warm-Up (5 minutes): Arm Circles, Leg Swings, Torso Twists, March in Place.\n\n");

  out.push_str(&format!("Main Workout - {} rounds:\n", plan.rounds));
  for exercise in &block.exercises {
    let prescription = match exercise.effort {
      Effort::Reps => plan.reps,
      Effort::Timed => plan.hold,
    };
    out.push_str(&format!("• {} - {}\n", exercise.name, prescription));
  }
  out.push_str(&format!(
    "Rest {} between exercises and {} between rounds.\n\n",
    plan.exercise_rest, plan.round_rest
  ));

  out.push_str(
    "Cool-Down (5 minutes): Quad Stretch, Hamstring Stretch, Shoulder Stretch, Deep Breathing.\n\n",
  );

  out.push_str("Tips:\n");
  out.push_str(plan.tip);
  out.push('\n');
  out.push_str("Sip water between rounds and breathe out on the effort.\n");
  out.push_str("Stop if you feel sharp pain rather than muscle fatigue.\n");

  out
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::extraction::extract_workout;

  fn request(goals: &[&str], level: Difficulty, minutes: u32, equipment: &[&str]) -> GenerationRequest {
    GenerationRequest {
      goals: goals.iter().map(|s| s.to_string()).collect(),
      fitness_level: level,
      available_time_minutes: minutes,
      equipment: equipment.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn test_identical_inputs_produce_identical_text() {
    let req = request(
      &["strength", "endurance"],
      Difficulty::Intermediate,
      40,
      &["dumbbells", "bench"],
    );
    assert_eq!(generate_fallback(&req), generate_fallback(&req));
  }

  #[test]
  fn test_strength_with_dumbbells_selects_weighted_beginner_plan() {
    let text = generate_fallback(&request(&["strength"], Difficulty::Beginner, 30, &["dumbbells"]));

    assert!(text.contains("Goblet Squats"));
    assert!(text.contains("2 rounds"));
    assert!(text.contains("60-90s"));
    assert!(text.contains("2-3 min"));
    assert!(text.contains("5-10 reps"));
  }

  #[test]
  fn test_strength_with_bands_selects_band_block() {
    let text = generate_fallback(&request(
      &["Strength and tone"],
      Difficulty::Intermediate,
      30,
      &["resistance bands"],
    ));
    assert!(text.contains("Band Squats"));
    assert!(text.contains("3 rounds"));
  }

  #[test]
  fn test_strength_with_other_equipment_selects_bodyweight_block() {
    let text = generate_fallback(&request(&["strength"], Difficulty::Intermediate, 30, &["yoga mat"]));
    assert!(text.contains("Pike Push-ups"));
  }

  #[test]
  fn test_strength_without_equipment_falls_through_to_general() {
    let text = generate_fallback(&request(&["strength"], Difficulty::Intermediate, 30, &[]));
    assert!(text.contains("Full Body Fitness"));
    assert!(text.contains("Glute Bridges"));
  }

  #[test]
  fn test_cardio_and_weight_loss_goals_select_their_blocks() {
    let cardio = generate_fallback(&request(&["improve endurance"], Difficulty::Beginner, 20, &[]));
    assert!(cardio.contains("Cardio Blast"));
    assert!(cardio.contains("High Knees"));

    let loss = generate_fallback(&request(&["lose weight"], Difficulty::Beginner, 20, &[]));
    assert!(loss.contains("Fat Burn Circuit"));
    assert!(loss.contains("Alternating Lunges"));
  }

  #[test]
  fn test_strength_rule_wins_over_later_rules() {
    let text = generate_fallback(&request(
      &["cardio", "strength"],
      Difficulty::Intermediate,
      30,
      &["barbell"],
    ));
    assert!(text.contains("Strength Builder"));
    assert!(!text.contains("Cardio Blast"));
  }

  #[test]
  fn test_advanced_plan_constants() {
    let text = generate_fallback(&request(&[], Difficulty::Advanced, 60, &[]));
    assert!(text.contains("4 rounds"));
    assert!(text.contains("18-25 reps"));
    assert!(text.contains("30-45s between exercises"));
    assert!(text.contains("1-1.5 min between rounds"));
    assert!(text.contains("45-60s")); // timed holds
  }

  #[test]
  fn test_output_survives_extraction() {
    let req = request(&["strength"], Difficulty::Advanced, 40, &["dumbbells"]);
    let workout = extract_workout(&generate_fallback(&req));

    assert_eq!(workout.name, "Strength Builder");
    assert_eq!(workout.duration_minutes, 40);
    assert_eq!(workout.difficulty, Difficulty::Advanced);
    assert_eq!(workout.exercises.len(), 4);
    assert!(workout.exercises[0].starts_with("Goblet Squats"));
    assert_eq!(workout.target_muscle_groups, vec!["Full Body"]);
  }
}
