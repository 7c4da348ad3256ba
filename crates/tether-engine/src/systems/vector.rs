//! Lyon-based vector rendering system.
//!
//! Provides CPU-side tessellation of filled and stroked shapes using Lyon,
//! producing a flat triangle-list vertex buffer that the host draws.
//! Clipped variants cut geometry against a [`ClipPath`] before tessellating.
//!
//! # Usage
//!
//! ```ignore
//! // In your Game::render():
//! ctx.vectors.stroke_ellipse(&ellipse, 1.0, VectorColor::rgb8(0x44, 0x44, 0x44));
//! ctx.vectors.fill_circle_clipped(pos, 1.0, VectorColor::WHITE, &clip);
//! ctx.vectors.composite(&baked_layer, 0.5);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::extensions::clip::ClipPath;
use crate::extensions::geometry::Ellipse;

/// Samples used when an ellipse has to be clipped as a polyline.
const ELLIPSE_CLIP_SAMPLES: usize = 96;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
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
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // Named color constants
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// State for vector rendering.
///
/// Holds lyon tessellators and the output vertex buffer.
/// The frame buffer is cleared by the runner before each render pass;
/// a separate `VectorState` can serve as a long-lived baked layer.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    /// Create a new VectorState.
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a VectorState with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(vertices * VectorVertex::FLOATS),
        }
    }

    /// Clear the vertex buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Flat float view of the buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer (for host copies).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Drop everything past `max_vertices`, keeping whole triangles.
    pub fn truncate(&mut self, max_vertices: usize) {
        let keep = (max_vertices / 3) * 3 * VectorVertex::FLOATS;
        if self.buffer.len() > keep {
            log::warn!(
                "vector buffer overflow: {} vertices, capacity {}",
                self.vertex_count(),
                max_vertices
            );
            self.buffer.truncate(keep);
        }
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Append another buffer's triangles with their alpha scaled by `opacity`.
    pub fn composite(&mut self, layer: &VectorState, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        for chunk in layer.buffer.chunks_exact(VectorVertex::FLOATS) {
            self.buffer.extend_from_slice(&chunk[..5]);
            self.buffer.push(chunk[5] * opacity);
        }
    }

    /// Tessellate and fill a circle.
    ///
    /// The circle is approximated using lyon's default tolerance.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Fill a circle only when its center lies inside `clip`.
    pub fn fill_circle_clipped(&mut self, center: Vec2, radius: f32, color: VectorColor, clip: &ClipPath) {
        if clip.contains(center) {
            self.fill_circle(center, radius, color);
        }
    }

    /// Tessellate and fill an arbitrary lyon Path.
    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Tessellate a stroked polyline (open path).
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false); // open path

        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Stroke only the parts of a polyline inside `clip`.
    pub fn stroke_polyline_clipped(&mut self, points: &[Vec2], width: f32, color: VectorColor, clip: &ClipPath) {
        for run in clip.clip_polyline(points) {
            self.stroke_polyline(&run, width, color);
        }
    }

    /// Tessellate a stroked ellipse outline.
    pub fn stroke_ellipse(&mut self, ellipse: &Ellipse, width: f32, color: VectorColor) {
        if ellipse.radii.x <= 0.0 || ellipse.radii.y <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_ellipse(
            point(ellipse.center.x, ellipse.center.y),
            lyon::math::vector(ellipse.radii.x, ellipse.radii.y),
            lyon::math::Angle::radians(0.0),
            lyon::path::Winding::Positive,
        );
        let path = builder.build();

        self.stroke_path(&path, width, color);
    }

    /// Stroke the parts of an ellipse outline inside `clip`.
    pub fn stroke_ellipse_clipped(&mut self, ellipse: &Ellipse, width: f32, color: VectorColor, clip: &ClipPath) {
        if ellipse.radii.x <= 0.0 || ellipse.radii.y <= 0.0 {
            return;
        }
        let outline = ellipse.outline(ELLIPSE_CLIP_SAMPLES);
        self.stroke_polyline_clipped(&outline, width, color, clip);
    }

    /// Tessellate an arbitrary stroked lyon Path.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
