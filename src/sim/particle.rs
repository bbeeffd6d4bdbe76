//! Decorative deep-sea particle field
//!
//! A fixed-size pool created once at initialization. Particles are never
//! removed, only wrapped back onto the surface when they drift off it.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::FieldTuning;

/// Particle categories, each with its own motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    /// Rising bubble with a sinusoidal sway
    Bubble,
    /// Glowing drifter attracted to the pointer
    Bioluminescent,
    /// Plain falling debris
    Debris,
}

impl ParticleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticleKind::Bubble => "bubbles",
            ParticleKind::Bioluminescent => "bioluminescent",
            ParticleKind::Debris => "debris",
        }
    }
}

/// Closed real interval; inverted bounds are swapped on construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct SpanF32 {
    pub min: f32,
    pub max: f32,
}

impl SpanF32 {
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Uniform sample in `[min, max)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

impl From<[f32; 2]> for SpanF32 {
    fn from([a, b]: [f32; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<SpanF32> for [f32; 2] {
    fn from(span: SpanF32) -> Self {
        [span.min, span.max]
    }
}

/// 8-bit sRGB color, written as `#rrggbb` in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalized RGBA with the given alpha
    pub fn with_alpha(&self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

fn default_drift() -> SpanF32 {
    SpanF32::new(-0.1, 0.1)
}

/// How to populate one category of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub kind: ParticleKind,
    pub count: usize,
    /// Radius range
    pub size: SpanF32,
    /// Vertical velocity range (negative rises)
    pub speed: SpanF32,
    /// Horizontal velocity range
    #[serde(default = "default_drift")]
    pub drift: SpanF32,
    pub colors: Vec<Rgb>,
    pub opacity: SpanF32,
    #[serde(default)]
    pub glow: bool,
}

/// A single decorative particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub vel: Vec2,
    /// Opacity drawn at creation
    pub base_opacity: f32,
    /// Current opacity (pulses when `glow` is set)
    pub opacity: f32,
    pub glow: bool,
    /// Phase offset for periodic motion, in [0, 2π)
    pub phase: f32,
}

/// The particle pool plus the RNG used for spawning and wrapping
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    tuning: FieldTuning,
    rng: Pcg32,
}

impl ParticleField {
    /// Create an empty field; call [`ParticleField::initialize`] to populate it
    pub fn new(seed: u64, tuning: FieldTuning) -> Self {
        Self {
            particles: Vec::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Populate the pool from per-category specs, replacing any previous pool
    pub fn initialize(&mut self, width: f32, height: f32, specs: &[CategorySpec]) {
        self.particles.clear();
        self.particles
            .reserve(specs.iter().map(|s| s.count).sum::<usize>());

        let mut next_id = 0u32;
        for spec in specs {
            if spec.colors.is_empty() && spec.count > 0 {
                log::warn!("No palette for {}, using white", spec.kind.as_str());
            }
            for _ in 0..spec.count {
                let rng = &mut self.rng;
                let pos = crate::random_point(rng, width, height);
                let radius = spec.size.sample(rng);
                let color = if spec.colors.is_empty() {
                    Rgb::WHITE
                } else {
                    spec.colors[rng.random_range(0..spec.colors.len())]
                };
                let vel = Vec2::new(spec.drift.sample(rng), spec.speed.sample(rng));
                let opacity = spec.opacity.sample(rng);
                let phase = rng.random::<f32>() * TAU;

                self.particles.push(Particle {
                    id: next_id,
                    kind: spec.kind,
                    pos,
                    radius,
                    color,
                    vel,
                    base_opacity: opacity,
                    opacity,
                    glow: spec.glow,
                    phase,
                });
                next_id += 1;
            }
        }

        log::debug!(
            "Particle field initialized: {} particles on {}x{}",
            self.particles.len(),
            width,
            height
        );
    }

    /// Advance every particle by one animation tick
    pub fn advance(&mut self, elapsed_ms: f64, attractor: Vec2, width: f32, height: f32) {
        let t = &self.tuning;
        let margin = t.wrap_margin;
        let sway_angle = elapsed_ms * t.sway_frequency;
        let glow_angle = elapsed_ms * t.glow_frequency;

        for p in self.particles.iter_mut() {
            p.pos += p.vel;

            match p.kind {
                ParticleKind::Bioluminescent => {
                    let to_pointer = attractor - p.pos;
                    if to_pointer.length() < t.attraction_radius {
                        p.pos += to_pointer * t.attraction_pull;
                    }
                }
                ParticleKind::Bubble => {
                    let sway = (p.phase as f64 + sway_angle).sin() as f32;
                    p.pos.x += sway * t.sway_amplitude;
                }
                ParticleKind::Debris => {}
            }

            if p.glow {
                let pulse = (glow_angle + p.phase as f64).sin() as f32;
                p.opacity = (t.glow_center + pulse * t.glow_swing).clamp(0.0, 1.0);
            }

            // Vertical wrap re-enters from the opposite edge at a new column
            if p.pos.y < -margin {
                p.pos.y = height + margin;
                p.pos.x = self.rng.random::<f32>() * width.max(0.0);
            } else if p.pos.y > height + margin {
                p.pos.y = -margin;
                p.pos.x = self.rng.random::<f32>() * width.max(0.0);
            }
            if p.pos.x < -margin || p.pos.x > width + margin {
                p.pos.x = self.rng.random::<f32>() * width.max(0.0);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles of the given category
    pub fn count_of(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn tuning(&self) -> &FieldTuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::default_categories;
    use proptest::prelude::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn field() -> ParticleField {
        let mut field = ParticleField::new(42, FieldTuning::default());
        field.initialize(W, H, &default_categories());
        field
    }

    fn still_debris(count: usize) -> CategorySpec {
        CategorySpec {
            kind: ParticleKind::Debris,
            count,
            size: SpanF32::new(1.0, 3.0),
            speed: SpanF32::new(0.0, 0.0),
            drift: SpanF32::new(0.0, 0.0),
            colors: vec![Rgb::new(0x8b, 0x45, 0x13)],
            opacity: SpanF32::new(0.3, 0.6),
            glow: false,
        }
    }

    #[test]
    fn test_initialize_counts() {
        let field = field();
        assert_eq!(field.len(), 65);
        assert_eq!(field.count_of(ParticleKind::Bubble), 30);
        assert_eq!(field.count_of(ParticleKind::Bioluminescent), 15);
        assert_eq!(field.count_of(ParticleKind::Debris), 20);
    }

    #[test]
    fn test_initialize_attributes_within_ranges() {
        let field = field();
        let specs = default_categories();
        for p in field.particles() {
            let spec = specs.iter().find(|s| s.kind == p.kind).unwrap();
            assert!(spec.size.contains(p.radius));
            assert!(spec.speed.contains(p.vel.y));
            assert!(spec.drift.contains(p.vel.x));
            assert!(spec.opacity.contains(p.opacity));
            assert!(spec.colors.contains(&p.color));
            assert_eq!(p.glow, spec.glow);
            assert!((0.0..TAU).contains(&p.phase));
            assert!((0.0..W).contains(&p.pos.x));
            assert!((0.0..H).contains(&p.pos.y));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let field = field();
        let mut ids: Vec<u32> = field.particles().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 65);
    }

    #[test]
    fn test_zero_count_category() {
        let mut field = ParticleField::new(1, FieldTuning::default());
        let mut specs = default_categories();
        specs[1].count = 0;
        field.initialize(W, H, &specs);
        assert_eq!(field.len(), 50);
        assert_eq!(field.count_of(ParticleKind::Bioluminescent), 0);
    }

    #[test]
    fn test_zero_velocity_is_idempotent() {
        let mut field = ParticleField::new(7, FieldTuning::default());
        field.initialize(W, H, &[still_debris(10)]);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();

        for i in 0..50 {
            field.advance(i as f64 * 16.0, Vec2::new(W / 2.0, H / 2.0), W, H);
        }

        let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_wrap_bottom_to_top() {
        let mut field = ParticleField::new(3, FieldTuning::default());
        field.initialize(W, H, &[still_debris(1)]);
        field.particles_mut()[0].pos = Vec2::new(100.0, H + 20.5);

        field.advance(0.0, Vec2::ZERO, W, H);

        let p = &field.particles()[0];
        assert!((-20.0..=0.0).contains(&p.pos.y), "y = {}", p.pos.y);
        assert!((0.0..W).contains(&p.pos.x));
    }

    #[test]
    fn test_wrap_top_to_bottom() {
        let mut field = ParticleField::new(3, FieldTuning::default());
        field.initialize(W, H, &[still_debris(1)]);
        field.particles_mut()[0].pos = Vec2::new(100.0, -21.0);

        field.advance(0.0, Vec2::ZERO, W, H);

        let p = &field.particles()[0];
        assert_eq!(p.pos.y, H + 20.0);
        assert!((0.0..W).contains(&p.pos.x));
    }

    #[test]
    fn test_horizontal_wrap_keeps_vertical() {
        let mut field = ParticleField::new(3, FieldTuning::default());
        field.initialize(W, H, &[still_debris(2)]);
        field.particles_mut()[0].pos = Vec2::new(-25.0, 300.0);
        field.particles_mut()[1].pos = Vec2::new(W + 25.0, 150.0);

        field.advance(0.0, Vec2::ZERO, W, H);

        let ps = field.particles();
        assert!((0.0..W).contains(&ps[0].pos.x));
        assert_eq!(ps[0].pos.y, 300.0);
        assert!((0.0..W).contains(&ps[1].pos.x));
        assert_eq!(ps[1].pos.y, 150.0);
    }

    #[test]
    fn test_within_margin_is_not_wrapped() {
        let mut field = ParticleField::new(3, FieldTuning::default());
        field.initialize(W, H, &[still_debris(1)]);
        field.particles_mut()[0].pos = Vec2::new(-19.0, -19.0);

        field.advance(0.0, Vec2::ZERO, W, H);

        assert_eq!(field.particles()[0].pos, Vec2::new(-19.0, -19.0));
    }

    #[test]
    fn test_attraction_within_radius() {
        let mut spec = still_debris(2);
        spec.kind = ParticleKind::Bioluminescent;
        let mut field = ParticleField::new(5, FieldTuning::default());
        field.initialize(W, H, &[spec]);
        field.particles_mut()[0].pos = Vec2::new(100.0, 100.0);
        field.particles_mut()[1].pos = Vec2::new(400.0, 400.0);

        let pointer = Vec2::new(150.0, 100.0);
        field.advance(0.0, pointer, W, H);

        let ps = field.particles();
        // 1% of the 50-unit gap
        assert!((ps[0].pos.x - 100.5).abs() < 1e-4);
        assert_eq!(ps[0].pos.y, 100.0);
        // Out of range: untouched
        assert_eq!(ps[1].pos, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_attraction_ignores_other_kinds() {
        let mut field = ParticleField::new(5, FieldTuning::default());
        field.initialize(W, H, &[still_debris(1)]);
        field.particles_mut()[0].pos = Vec2::new(100.0, 100.0);

        field.advance(0.0, Vec2::new(110.0, 100.0), W, H);

        assert_eq!(field.particles()[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_bubble_sway() {
        let mut spec = still_debris(1);
        spec.kind = ParticleKind::Bubble;
        let mut field = ParticleField::new(9, FieldTuning::default());
        field.initialize(W, H, &[spec]);
        field.particles_mut()[0].pos = Vec2::new(200.0, 200.0);
        field.particles_mut()[0].phase = std::f32::consts::FRAC_PI_2;

        // sin(π/2 + 0) * 0.5
        field.advance(0.0, Vec2::ZERO, W, H);
        assert!((field.particles()[0].pos.x - 200.5).abs() < 1e-4);
        assert_eq!(field.particles()[0].pos.y, 200.0);
    }

    #[test]
    fn test_glow_pulse_range() {
        let mut field = field();
        for i in 0..500 {
            field.advance(i as f64 * 16.7, Vec2::ZERO, W, H);
            for p in field.particles().iter().filter(|p| p.glow) {
                assert!(p.opacity >= 0.2 - 1e-5 && p.opacity <= 1.0 + 1e-5);
            }
        }
    }

    #[test]
    fn test_fixed_attributes_survive_ticks() {
        let mut field = field();
        let before: Vec<(f32, f32, Rgb)> = field
            .particles()
            .iter()
            .map(|p| (p.radius, p.base_opacity, p.color))
            .collect();

        for i in 0..1000 {
            field.advance(i as f64 * 16.0, Vec2::new(400.0, 300.0), W, H);
        }

        assert_eq!(field.len(), 65);
        let after: Vec<(f32, f32, Rgb)> = field
            .particles()
            .iter()
            .map(|p| (p.radius, p.base_opacity, p.color))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_determinism() {
        let mut a = field();
        let mut b = field();
        for i in 0..200 {
            a.advance(i as f64 * 16.0, Vec2::new(300.0, 300.0), W, H);
            b.advance(i as f64 * 16.0, Vec2::new(300.0, 300.0), W, H);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_inverted_span_normalized() {
        let span = SpanF32::new(-0.3, -0.8);
        assert_eq!(span.min, -0.8);
        assert_eq!(span.max, -0.3);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::from_hex("#1e90ff"), Some(Rgb::new(0x1e, 0x90, 0xff)));
        assert_eq!(Rgb::from_hex("87CEEB"), Some(Rgb::new(0x87, 0xce, 0xeb)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::new(0, 255, 16).to_hex(), "#00ff10");
    }

    proptest! {
        #[test]
        fn prop_vertical_wrap_bounds(x in -10.0f32..810.0, overshoot in 0.01f32..500.0) {
            let mut field = ParticleField::new(11, FieldTuning::default());
            field.initialize(W, H, &[still_debris(1)]);
            field.particles_mut()[0].pos = Vec2::new(x, H + 20.0 + overshoot);

            field.advance(0.0, Vec2::ZERO, W, H);

            let p = &field.particles()[0];
            prop_assert!(p.pos.y >= -20.0 && p.pos.y <= 0.0);
            prop_assert!(p.pos.x >= 0.0 && p.pos.x < W);
        }
    }
}
