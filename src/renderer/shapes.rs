//! Shape generation for 2D primitives

use super::scene::{FillRect, Scene};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Triangle list for every rectangle in the scene, in draw order
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.rects.len() * 6);
    for FillRect { rect: r, color } in &scene.rects {
        vertices.extend_from_slice(&rect(r, *color));
    }
    vertices
}

/// Map logical coordinates (origin top-left, y down) to NDC (y up)
pub fn logical_to_ndc(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    let w = width.max(1.0);
    let h = height.max(1.0);
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}
