//! Ocean Explorer - an interactive deep-sea presentation
//!
//! Core modules:
//! - `sim`: Platform-free state (particle field, ripples, navigation, quiz)
//! - `renderer`: Retained scene graph and WebGPU pipeline
//! - `app`: Shared context that dispatches input and drives frames
//! - `audio`: Sound cue collaborator (Web Audio on wasm)
//! - `content`: Static zone, creature and quiz tables
//! - `settings`: Data-driven tuning

pub mod app;
pub mod audio;
pub mod content;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{AppEvent, Explorer};
pub use settings::{FieldTuning, Settings};

use glam::Vec2;

/// Default tuning constants
pub mod consts {
    /// Particles further than this outside the surface get wrapped
    pub const WRAP_MARGIN: f32 = 20.0;
    /// Glowing drifters within this distance of the pointer are attracted
    pub const ATTRACTION_RADIUS: f32 = 100.0;
    /// Fraction of the distance to the pointer closed per tick
    pub const ATTRACTION_PULL: f32 = 0.01;

    /// Bubble sway angular frequency (radians per ms)
    pub const BUBBLE_SWAY_FREQUENCY: f64 = 0.001;
    /// Bubble sway horizontal offset per tick
    pub const BUBBLE_SWAY_AMPLITUDE: f32 = 0.5;

    /// Glow pulse angular frequency (radians per ms)
    pub const GLOW_FREQUENCY: f64 = 0.003;
    /// Glow opacity oscillates in [center - swing, center + swing]
    pub const GLOW_CENTER: f32 = 0.6;
    pub const GLOW_SWING: f32 = 0.4;

    /// Ripples are dropped once their age reaches this many ticks
    pub const RIPPLE_LIFETIME: u32 = 100;
    /// Ripple radius growth per tick
    pub const RIPPLE_GROWTH: f32 = 2.0;
    pub const RIPPLE_STROKE_WIDTH: f32 = 2.0;

    /// Horizontal swipes shorter than this are ignored
    pub const SWIPE_MIN_DISTANCE: f32 = 50.0;
    /// Delay before a revealed section animates to its resting style
    pub const REVEAL_DELAY_MS: f64 = 100.0;
    /// Offscreen vertical offset of a hidden section (px)
    pub const REVEAL_OFFSET_Y: f32 = 30.0;
    /// Landing page fade before the main experience shows
    pub const DIVE_DURATION_MS: f64 = 2000.0;

    /// Depth gauge: sin(t * factor) * swing + center
    pub const DEPTH_FREQUENCY: f64 = 0.0005;
    pub const DEPTH_CENTER_M: f32 = 1000.0;
    pub const DEPTH_SWING_M: f32 = 500.0;

    /// Audio level restored by the audio toggle
    pub const DEFAULT_VOLUME: f32 = 0.2;
}

/// Random point inside `[0, width) x [0, height)`
#[inline]
pub fn random_point<R: rand::Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * width.max(0.0),
        rng.random::<f32>() * height.max(0.0),
    )
}
