//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    pub const FLOOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const FLOOR_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLATFORM_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLATFORM_FILL: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const HAZARD: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const PORTAL_SHIP: [f32; 4] = [1.0, 0.65, 0.8, 0.35];
    pub const PORTAL_CUBE: [f32; 4] = [0.4, 1.0, 1.0, 0.35];
    pub const PLAYER_CUBE: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_SHIP: [f32; 4] = [1.0, 0.33, 0.67, 1.0];
    pub const PLAYER_INNER: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Background keyed to locomotion mode: deep navy for cube, violet for ship
    pub const BACKGROUND_CUBE: wgpu::Color = wgpu::Color {
        r: 0.0,
        g: 0.004,
        b: 0.04,
        a: 1.0,
    };
    pub const BACKGROUND_SHIP: wgpu::Color = wgpu::Color {
        r: 0.01,
        g: 0.0,
        b: 0.018,
        a: 1.0,
    };
}
