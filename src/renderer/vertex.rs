//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::particle::Rgb;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for the deep-sea surface
pub mod colors {
    use super::Rgb;

    /// Abyss background (linear)
    pub const BACKGROUND: [f64; 4] = [0.0, 0.004, 0.02, 1.0];

    /// sRGB palette color to linear RGBA for an sRGB render target
    pub fn linear(color: Rgb, alpha: f32) -> [f32; 4] {
        let [r, g, b, _] = color.with_alpha(alpha);
        [to_linear(r), to_linear(g), to_linear(b), alpha]
    }

    fn to_linear(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

}
