//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

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

/// Colors for game elements
///
/// Values are sRGB-encoded, as written in CSS. `for_target` converts them
/// for sRGB surfaces, which expect linear shader output.
pub mod colors {
    pub const HOOK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const TEXT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Pale water
    pub const BACKGROUND: [f32; 4] = [0.86, 0.94, 0.98, 1.0];

    /// Decode one sRGB channel to linear light
    pub fn srgb_to_linear(c: f32) -> f32 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Encode one linear channel as sRGB
    pub fn linear_to_srgb(c: f32) -> f32 {
        if c <= 0.003_130_8 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        }
    }

    /// Color as the render target wants it; alpha is always linear
    pub fn for_target(color: [f32; 4], srgb_target: bool) -> [f32; 4] {
        if !srgb_target {
            return color;
        }
        [
            srgb_to_linear(color[0]),
            srgb_to_linear(color[1]),
            srgb_to_linear(color[2]),
            color[3],
        ]
    }

    /// CSS `rgba()` string for DOM overlays
    pub fn css(color: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            color[3]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes[1].offset, 8);
    }

    /// Byte the display shows after an sRGB surface encodes the shader output
    fn displayed(color: [f32; 4], srgb_target: bool) -> [u8; 3] {
        let out = colors::for_target(color, srgb_target);
        let encode = |c: f32| {
            let c = if srgb_target { colors::linear_to_srgb(c) } else { c };
            (c * 255.0).round() as u8
        };
        [encode(out[0]), encode(out[1]), encode(out[2])]
    }

    #[test]
    fn test_srgb_surface_shows_hex_value() {
        use crate::sim::species::rgb;
        assert_eq!(displayed(rgb(0x00CED1), true), [0x00, 0xCE, 0xD1]);
        assert_eq!(displayed(rgb(0xFA2034), true), [0xFA, 0x20, 0x34]);
        assert_eq!(displayed(rgb(0xFFD700), false), [0xFF, 0xD7, 0x00]);
    }

    #[test]
    fn test_for_target_keeps_alpha_and_extremes() {
        let c = colors::for_target([0.0, 1.0, 0.5, 0.25], true);
        assert_eq!(c[0], 0.0);
        assert!((c[1] - 1.0).abs() < 1e-6);
        assert!(c[2] < 0.5);
        assert_eq!(c[3], 0.25);
        assert_eq!(colors::for_target(colors::BACKGROUND, false), colors::BACKGROUND);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(colors::css(colors::TEXT), "rgba(0, 0, 0, 1)");
        assert_eq!(colors::css([1.0, 0.5, 0.0, 0.5]), "rgba(255, 128, 0, 0.5)");
    }
}
