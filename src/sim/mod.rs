//! Platform-free presentation state
//!
//! Nothing in here touches the DOM, the GPU or audio directly:
//! - Seeded RNG only
//! - Time comes in as elapsed milliseconds
//! - Collaborators (audio, render surface) are passed in as traits

pub mod effects;
pub mod navigation;
pub mod particle;
pub mod quiz;
pub mod reveal;
pub mod ripple;

pub use effects::{EffectsPhase, VisualEffectsController};
pub use navigation::{NavCommand, NavigationState, Section, Transition};
pub use particle::{CategorySpec, Particle, ParticleField, ParticleKind, Rgb, SpanF32};
pub use quiz::{Feedback, QuizPhase, QuizSession};
pub use reveal::{SectionStage, SectionStyle};
pub use ripple::{Ripple, RippleSet};
