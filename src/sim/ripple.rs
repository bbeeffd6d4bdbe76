//! Click ripples: expanding rings with a fixed lifetime

use glam::Vec2;

use crate::consts::{RIPPLE_GROWTH, RIPPLE_LIFETIME};

/// An expanding ring spawned by a pointer click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: u32,
    pub origin: Vec2,
    pub radius: f32,
    /// Ticks since spawn
    pub age: u32,
}

impl Ripple {
    /// Linear fade, fully transparent once `age >= lifetime`
    pub fn opacity(&self, lifetime: u32) -> f32 {
        fade(self.age, lifetime)
    }
}

/// `max(0, 1 - age / lifetime)`
pub fn fade(age: u32, lifetime: u32) -> f32 {
    if lifetime == 0 {
        return 0.0;
    }
    (1.0 - age as f32 / lifetime as f32).max(0.0)
}

/// Live ripples, oldest first
#[derive(Debug, Clone)]
pub struct RippleSet {
    ripples: Vec<Ripple>,
    lifetime: u32,
    growth: f32,
    next_id: u32,
}

impl Default for RippleSet {
    fn default() -> Self {
        Self::new(RIPPLE_LIFETIME, RIPPLE_GROWTH)
    }
}

impl RippleSet {
    pub fn new(lifetime: u32, growth: f32) -> Self {
        Self {
            ripples: Vec::new(),
            lifetime,
            growth,
            next_id: 0,
        }
    }

    /// Append a fresh ripple (radius 0, age 0); returns its id
    pub fn spawn(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.ripples.push(Ripple {
            id,
            origin: Vec2::new(x, y),
            radius: 0.0,
            age: 0,
        });
        id
    }

    /// Age and grow every ripple, then drop the expired ones
    pub fn advance(&mut self) {
        for ripple in &mut self.ripples {
            ripple.age += 1;
            ripple.radius += self.growth;
        }
        let lifetime = self.lifetime;
        self.ripples.retain(|r| r.age < lifetime);
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn opacity(&self, ripple: &Ripple) -> f32 {
        ripple.opacity(self.lifetime)
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ripples.iter().any(|r| r.id == id)
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn() {
        let mut set = RippleSet::default();
        let id = set.spawn(10.0, 20.0);
        let r = set.ripples()[0];
        assert_eq!(r.id, id);
        assert_eq!(r.origin, Vec2::new(10.0, 20.0));
        assert_eq!(r.radius, 0.0);
        assert_eq!(r.age, 0);
    }

    #[test]
    fn test_radius_tracks_age() {
        let mut set = RippleSet::default();
        set.spawn(0.0, 0.0);
        for _ in 0..37 {
            set.advance();
        }
        let r = set.ripples()[0];
        assert_eq!(r.age, 37);
        assert_eq!(r.radius, 2.0 * r.age as f32);
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0, 100), 1.0);
        assert_eq!(fade(50, 100), 0.5);
        assert_eq!(fade(100, 100), 0.0);
        assert_eq!(fade(150, 100), 0.0);
    }

    #[test]
    fn test_removed_after_lifetime() {
        let mut set = RippleSet::default();
        let id = set.spawn(5.0, 5.0);

        // Present for the tick it was spawned on and 99 more
        for _ in 0..99 {
            set.advance();
            assert!(set.contains(id));
        }
        set.advance();
        assert!(!set.contains(id));
        assert!(set.is_empty());
    }

    #[test]
    fn test_staggered_spawns_expire_independently() {
        let mut set = RippleSet::default();
        let first = set.spawn(0.0, 0.0);
        for _ in 0..50 {
            set.advance();
        }
        let second = set.spawn(1.0, 1.0);
        for _ in 0..50 {
            set.advance();
        }
        assert!(!set.contains(first));
        assert!(set.contains(second));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut set = RippleSet::default();
        let a = set.spawn(0.0, 0.0);
        for _ in 0..100 {
            set.advance();
        }
        let b = set.spawn(0.0, 0.0);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_fade_is_clamped_and_monotonic(age in 0u32..1000) {
            let o = fade(age, 100);
            prop_assert!((0.0..=1.0).contains(&o));
            prop_assert!(fade(age + 1, 100) <= o);
            if age >= 100 {
                prop_assert_eq!(o, 0.0);
            }
        }
    }
}
