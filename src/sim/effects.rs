//! Deep-sea visual effects controller
//!
//! Owns the particle field and click ripples for the deep-sea region and
//! gates all per-frame work on whether the region is in view. The frame
//! driver keeps firing while hidden; those ticks are no-ops.

use glam::Vec2;

use super::particle::{ParticleField, Rgb};
use super::ripple::RippleSet;
use crate::audio::AudioCues;
use crate::consts::RIPPLE_STROKE_WIDTH;
use crate::renderer::scene::{Primitive, PrimitiveKey, RenderSurface, Scene};
use crate::settings::{FieldTuning, Settings};

/// Ripple stroke color
pub const RIPPLE_COLOR: Rgb = Rgb::new(0x00, 0xff, 0xff);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectsPhase {
    /// Region out of view: ticks do nothing
    Inactive,
    /// Region visible: ticks advance and render
    Active,
}

pub struct VisualEffectsController {
    phase: EffectsPhase,
    field: ParticleField,
    ripples: RippleSet,
    /// Most recent pointer position, region-relative
    attractor: Vec2,
    size: Vec2,
    scene: Scene,
    depth: f32,
    tuning: FieldTuning,
}

impl VisualEffectsController {
    pub fn new(settings: &Settings, seed: u64, width: f32, height: f32) -> Self {
        let tuning = settings.tuning.clone();
        let mut field = ParticleField::new(seed, tuning.clone());
        field.initialize(width, height, &settings.categories);

        Self {
            phase: EffectsPhase::Inactive,
            field,
            ripples: RippleSet::new(tuning.ripple_lifetime, tuning.ripple_growth),
            attractor: Vec2::ZERO,
            size: Vec2::new(width, height),
            scene: Scene::new(),
            depth: tuning.depth_center,
            tuning,
        }
    }

    /// Visibility-observer input
    pub fn set_visible(&mut self, visible: bool) {
        let phase = if visible {
            EffectsPhase::Active
        } else {
            EffectsPhase::Inactive
        };
        if phase != self.phase {
            log::debug!("Deep-sea effects {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        self.attractor = self.attractor.clamp(Vec2::ZERO, self.size);
    }

    /// Track the pointer regardless of phase; most recent value wins
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.attractor = Vec2::new(x, y).clamp(Vec2::ZERO, self.size);
    }

    /// Spawn a ripple (and a bubble cue when audible) while active.
    /// Returns the new ripple id.
    pub fn pointer_click(&mut self, x: f32, y: f32, audio: &mut dyn AudioCues) -> Option<u32> {
        if self.phase != EffectsPhase::Active {
            return None;
        }
        let id = self.ripples.spawn(x, y);
        if audio.volume() > 0.0 {
            audio.play_bubble_sound();
        }
        Some(id)
    }

    /// One animation frame. Returns true when state advanced and was rendered.
    pub fn tick(&mut self, elapsed_ms: f64, surface: &mut dyn RenderSurface) -> bool {
        if self.phase != EffectsPhase::Active {
            return false;
        }

        self.field
            .advance(elapsed_ms, self.attractor, self.size.x, self.size.y);
        self.ripples.advance();

        let t = &self.tuning;
        self.depth =
            (elapsed_ms * t.depth_frequency).sin() as f32 * t.depth_swing + t.depth_center;

        self.render(surface);
        true
    }

    fn render(&mut self, surface: &mut dyn RenderSurface) {
        let particles = self.field.particles().iter().map(|p| {
            (
                PrimitiveKey::Particle(p.id),
                Primitive::Circle {
                    center: p.pos,
                    radius: p.radius,
                    fill: p.color,
                    opacity: p.opacity,
                    glow: p.glow,
                },
            )
        });
        let lifetime = self.ripples.lifetime();
        let ripples = self.ripples.ripples().iter().map(move |r| {
            (
                PrimitiveKey::Ripple(r.id),
                Primitive::Ring {
                    center: r.origin,
                    radius: r.radius,
                    stroke: RIPPLE_COLOR,
                    width: RIPPLE_STROKE_WIDTH,
                    opacity: r.opacity(lifetime),
                },
            )
        });

        let diff = self.scene.sync(particles.chain(ripples));
        surface.present(&diff, &self.scene);
    }

    pub fn phase(&self) -> EffectsPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == EffectsPhase::Active
    }

    pub fn attractor(&self) -> Vec2 {
        self.attractor
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn ripples(&self) -> &RippleSet {
        &self.ripples
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Depth gauge reading in whole meters
    pub fn depth_meters(&self) -> u32 {
        self.depth.abs().round() as u32
    }
}
