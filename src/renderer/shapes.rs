//! Shape generation for scene primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::Primitive;
use super::vertex::{Vertex, colors};

/// Halo layers drawn under glowing particles: (radius scale, alpha scale)
const GLOW_LAYERS: [(f32, f32); 2] = [(3.0, 0.12), (1.8, 0.3)];

/// Segment count that keeps small circles cheap and large rings smooth
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(8, 64)
}

/// Tessellate one scene primitive
pub fn primitive(primitive: &Primitive) -> Vec<Vertex> {
    match *primitive {
        Primitive::Circle {
            center,
            radius,
            fill,
            opacity,
            glow,
        } => {
            let mut vertices = Vec::new();
            if glow {
                for (scale, alpha) in GLOW_LAYERS {
                    let r = radius * scale;
                    let color = colors::linear(fill, opacity * alpha);
                    vertices.extend(circle(center, r, color, segments_for(r)));
                }
            }
            let color = colors::linear(fill, opacity);
            vertices.extend(circle(center, radius, color, segments_for(radius)));
            vertices
        }
        Primitive::Ring {
            center,
            radius,
            stroke,
            width,
            opacity,
        } => {
            let inner = (radius - width / 2.0).max(0.0);
            let outer = radius + width / 2.0;
            let color = colors::linear(stroke, opacity);
            ring(center, inner, outer, color, segments_for(outer))
        }
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}
