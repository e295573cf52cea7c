pub mod generation;
pub mod workout;

pub use generation::{
  GenerationOutcome, GenerationPhase, GenerationRequest, GenerationSource, GenerationState,
};
pub use workout::{Difficulty, Workout};
