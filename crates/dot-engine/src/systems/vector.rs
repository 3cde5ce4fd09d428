//! Lyon-based vector rendering system.
//!
//! Provides CPU-side tessellation of filled shapes using Lyon, producing a
//! flat triangle-list vertex buffer that the host draws on its overlay canvas.
//!
//! # Usage
//!
//! ```ignore
//! vectors.clear();
//! vectors.fill_polygon(&chip_corners, VectorColor::hex(0xff5e7e));
//! vectors.fill_ellipse(center, Vec2::new(4.0, 2.5), VectorColor::hex(0x26ccff));
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

use crate::systems::color::VectorColor;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(pos: lyon::math::Point, color: VectorColor) -> Self {
        let VectorColor { r, g, b, a } = color;
        Self { x: pos.x, y: pos.y, r, g, b, a }
    }

    fn floats(&self) -> [f32; Self::FLOATS] {
        [self.x, self.y, self.r, self.g, self.b, self.a]
    }
}

/// Triangle-list output for one frame of confetti.
///
/// Every shape is tessellated into `scratch` first and copied out only if
/// all of its triangles fit.
pub struct VectorState {
    tessellator: FillTessellator,
    scratch: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a VectorState that never grows past `max_vertices`.
    /// Shapes that would overflow the buffer are dropped whole.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            tessellator: FillTessellator::new(),
            scratch: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for host-side copies).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Copy the scratch shape out as unindexed triangles, if it fits.
    fn commit_shape(&mut self) {
        let needed = self.scratch.indices.len();
        if self.vertex_count() + needed <= self.max_vertices {
            let VertexBuffers { vertices, indices } = &self.scratch;
            self.buffer
                .extend(indices.iter().flat_map(|&i| vertices[i as usize].floats()));
        } else {
            log::trace!("vector buffer full, dropping shape of {needed} vertices");
        }
        self.discard_shape();
    }

    fn discard_shape(&mut self) {
        self.scratch.vertices.clear();
        self.scratch.indices.clear();
    }

    /// Tessellate and fill a polygon.
    ///
    /// The polygon is closed automatically. Self-intersecting outlines are
    /// filled with the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: VectorColor) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill an axis-aligned ellipse.
    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: VectorColor) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_ellipse(
            point(center.x, center.y),
            lyon::math::vector(radii.x, radii.y),
            lyon::math::Angle::radians(0.0),
            lyon::path::Winding::Positive,
        );
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill an arbitrary lyon Path.
    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        if color.a <= 0.0 {
            return;
        }
        let result = self.tessellator.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.scratch, |v: FillVertex| {
                VectorVertex::at(v.position(), color)
            }),
        );

        match result {
            Ok(()) => self.commit_shape(),
            Err(e) => {
                log::debug!("fill tessellation failed: {e:?}");
                self.discard_shape();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::FLOATS, 6);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn triangle_is_one_triangle() {
        let mut state = VectorState::new();
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(50.0, 100.0),
        ];
        state.fill_polygon(&points, VectorColor::WHITE);

        assert_eq!(state.vertex_count(), 3);
    }

    #[test]
    fn fill_ellipse_produces_vertices() {
        let mut state = VectorState::new();
        state.fill_ellipse(Vec2::new(50.0, 50.0), Vec2::new(6.0, 3.0), VectorColor::hex(0x26ccff));
        assert!(state.vertex_count() > 0);
    }

    #[test]
    fn transparent_shapes_are_skipped() {
        let mut state = VectorState::new();
        state.fill_ellipse(Vec2::new(50.0, 50.0), Vec2::new(6.0, 3.0), VectorColor::TRANSPARENT);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut state = VectorState::with_capacity(4);
        let tri = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        state.fill_polygon(&tri, VectorColor::WHITE);
        state.fill_polygon(&tri, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 3);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut state = VectorState::new();
        state.fill_ellipse(Vec2::new(5.0, 5.0), Vec2::new(4.0, 4.0), VectorColor::WHITE);
        assert!(state.vertex_count() > 0);

        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn degenerate_input_produces_nothing() {
        let mut state = VectorState::new();
        state.fill_polygon(&[], VectorColor::WHITE);
        state.fill_polygon(&[Vec2::ZERO, Vec2::ONE], VectorColor::WHITE);
        state.fill_ellipse(Vec2::ZERO, Vec2::new(0.0, 3.0), VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }
}
