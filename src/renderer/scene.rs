//! Retained scene graph
//!
//! Each frame the caller supplies the full set of primitives it wants on
//! screen, keyed by entity. [`Scene::sync`] diffs that against the previous
//! frame so a surface only creates, updates or deletes what changed.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::sim::particle::Rgb;

/// Identity of a drawn entity. Ordering is draw order (particles first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKey {
    Particle(u32),
    Ripple(u32),
}

/// A circular visual primitive in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled disc, optionally with a soft halo
    Circle {
        center: Vec2,
        radius: f32,
        fill: Rgb,
        opacity: f32,
        glow: bool,
    },
    /// Unfilled ring
    Ring {
        center: Vec2,
        radius: f32,
        stroke: Rgb,
        width: f32,
        opacity: f32,
    },
}

/// What changed between two frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDiff {
    pub added: Vec<PrimitiveKey>,
    pub updated: Vec<PrimitiveKey>,
    pub removed: Vec<PrimitiveKey>,
}

impl SceneDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Consumer of scene diffs (GPU pipeline, DOM, test fakes)
pub trait RenderSurface {
    /// Apply `diff`; `scene` is the state after the diff
    fn present(&mut self, diff: &SceneDiff, scene: &Scene);
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<PrimitiveKey, Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scene contents with `desired`, reporting the changes
    pub fn sync<I>(&mut self, desired: I) -> SceneDiff
    where
        I: IntoIterator<Item = (PrimitiveKey, Primitive)>,
    {
        let mut diff = SceneDiff::default();
        let mut next = BTreeMap::new();

        for (key, primitive) in desired {
            match self.nodes.remove(&key) {
                None => diff.added.push(key),
                Some(previous) if previous != primitive => diff.updated.push(key),
                Some(_) => {}
            }
            next.insert(key, primitive);
        }

        // Whatever was not claimed this frame is gone
        diff.removed.extend(self.nodes.keys().copied());
        self.nodes = next;
        diff
    }

    /// Remove everything, reporting the deletions
    pub fn clear(&mut self) -> SceneDiff {
        let removed = self.nodes.keys().copied().collect();
        self.nodes.clear();
        SceneDiff {
            removed,
            ..Default::default()
        }
    }

    pub fn get(&self, key: PrimitiveKey) -> Option<&Primitive> {
        self.nodes.get(&key)
    }

    /// Primitives in draw order
    pub fn iter(&self) -> impl Iterator<Item = (&PrimitiveKey, &Primitive)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Surface that only tallies diffs (headless runs)
#[derive(Debug, Clone, Default)]
pub struct TallySurface {
    pub frames: u64,
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub live: usize,
}

impl RenderSurface for TallySurface {
    fn present(&mut self, diff: &SceneDiff, scene: &Scene) {
        self.frames += 1;
        self.added += diff.added.len();
        self.updated += diff.updated.len();
        self.removed += diff.removed.len();
        self.live = scene.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(x: f32) -> Primitive {
        Primitive::Circle {
            center: Vec2::new(x, 0.0),
            radius: 2.0,
            fill: Rgb::WHITE,
            opacity: 1.0,
            glow: false,
        }
    }

    #[test]
    fn test_enter_update_exit() {
        let mut scene = Scene::new();

        let diff = scene.sync([
            (PrimitiveKey::Particle(0), dot(0.0)),
            (PrimitiveKey::Particle(1), dot(1.0)),
        ]);
        assert_eq!(
            diff.added,
            vec![PrimitiveKey::Particle(0), PrimitiveKey::Particle(1)]
        );
        assert!(diff.updated.is_empty() && diff.removed.is_empty());

        let diff = scene.sync([
            (PrimitiveKey::Particle(0), dot(0.0)),
            (PrimitiveKey::Particle(1), dot(5.0)),
            (PrimitiveKey::Ripple(0), dot(9.0)),
        ]);
        assert_eq!(diff.added, vec![PrimitiveKey::Ripple(0)]);
        assert_eq!(diff.updated, vec![PrimitiveKey::Particle(1)]);
        assert!(diff.removed.is_empty());

        let diff = scene.sync([(PrimitiveKey::Particle(1), dot(5.0))]);
        assert!(diff.added.is_empty() && diff.updated.is_empty());
        assert_eq!(
            diff.removed,
            vec![PrimitiveKey::Particle(0), PrimitiveKey::Ripple(0)]
        );
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_unchanged_frame_is_empty_diff() {
        let mut scene = Scene::new();
        scene.sync([(PrimitiveKey::Particle(3), dot(3.0))]);
        let diff = scene.sync([(PrimitiveKey::Particle(3), dot(3.0))]);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_draw_order_particles_before_ripples() {
        let mut scene = Scene::new();
        scene.sync([
            (PrimitiveKey::Ripple(0), dot(0.0)),
            (PrimitiveKey::Particle(9), dot(0.0)),
        ]);
        let keys: Vec<_> = scene.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![PrimitiveKey::Particle(9), PrimitiveKey::Ripple(0)]
        );
    }

    #[test]
    fn test_clear() {
        let mut scene = Scene::new();
        scene.sync([(PrimitiveKey::Particle(0), dot(0.0))]);
        let diff = scene.clear();
        assert_eq!(diff.removed, vec![PrimitiveKey::Particle(0)]);
        assert!(scene.is_empty());
    }
}
