//! Presentation settings and tuning
//!
//! Everything is optional in the JSON form; missing fields take the
//! defaults below. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::particle::{CategorySpec, ParticleKind, Rgb, SpanF32};

/// Tunable constants for the particle field, ripples and navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    // === Particle field ===
    /// Distance beyond the surface edge before a particle is wrapped
    pub wrap_margin: f32,
    /// Pointer attraction radius for glowing drifters
    pub attraction_radius: f32,
    /// Fraction of the pointer distance closed per tick
    pub attraction_pull: f32,
    pub sway_frequency: f64,
    pub sway_amplitude: f32,
    pub glow_frequency: f64,
    pub glow_center: f32,
    pub glow_swing: f32,

    // === Ripples ===
    /// Age (ticks) at which a ripple is removed
    pub ripple_lifetime: u32,
    pub ripple_growth: f32,

    // === Navigation ===
    pub swipe_min_distance: f32,
    pub reveal_delay_ms: f64,

    // === Depth gauge ===
    pub depth_frequency: f64,
    pub depth_center: f32,
    pub depth_swing: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            wrap_margin: WRAP_MARGIN,
            attraction_radius: ATTRACTION_RADIUS,
            attraction_pull: ATTRACTION_PULL,
            sway_frequency: BUBBLE_SWAY_FREQUENCY,
            sway_amplitude: BUBBLE_SWAY_AMPLITUDE,
            glow_frequency: GLOW_FREQUENCY,
            glow_center: GLOW_CENTER,
            glow_swing: GLOW_SWING,

            ripple_lifetime: RIPPLE_LIFETIME,
            ripple_growth: RIPPLE_GROWTH,

            swipe_min_distance: SWIPE_MIN_DISTANCE,
            reveal_delay_ms: REVEAL_DELAY_MS,

            depth_frequency: DEPTH_FREQUENCY,
            depth_center: DEPTH_CENTER_M,
            depth_swing: DEPTH_SWING_M,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub tuning: FieldTuning,
    /// Particle categories populated into the deep-sea field
    pub categories: Vec<CategorySpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: DEFAULT_VOLUME,
            seed: None,
            tuning: FieldTuning::default(),
            categories: default_categories(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Total particle count across all categories
    pub fn particle_count(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }
}

/// The deep-sea field: rising bubbles, glowing plankton and sinking debris
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec {
            kind: ParticleKind::Bubble,
            count: 30,
            size: SpanF32::new(2.0, 8.0),
            speed: SpanF32::new(-0.3, -0.8),
            drift: SpanF32::new(-0.1, 0.1),
            colors: vec![
                Rgb::new(0x00, 0xff, 0xff),
                Rgb::new(0x1e, 0x90, 0xff),
                Rgb::new(0x87, 0xce, 0xeb),
            ],
            opacity: SpanF32::new(0.4, 0.8),
            glow: false,
        },
        CategorySpec {
            kind: ParticleKind::Bioluminescent,
            count: 15,
            size: SpanF32::new(1.0, 4.0),
            speed: SpanF32::new(-0.1, -0.3),
            drift: SpanF32::new(-0.1, 0.1),
            colors: vec![
                Rgb::new(0x00, 0xff, 0x00),
                Rgb::new(0xff, 0xff, 0x00),
                Rgb::new(0xff, 0x00, 0xff),
                Rgb::new(0x00, 0xff, 0xff),
            ],
            opacity: SpanF32::new(0.6, 1.0),
            glow: true,
        },
        CategorySpec {
            kind: ParticleKind::Debris,
            count: 20,
            size: SpanF32::new(1.0, 3.0),
            speed: SpanF32::new(-0.2, -0.5),
            drift: SpanF32::new(-0.1, 0.1),
            colors: vec![
                Rgb::new(0x8b, 0x45, 0x13),
                Rgb::new(0x65, 0x43, 0x21),
                Rgb::new(0x2f, 0x1b, 0x14),
            ],
            opacity: SpanF32::new(0.3, 0.6),
            glow: false,
        },
    ]
}
