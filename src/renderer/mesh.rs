//! Vertex mesh backend
//!
//! Collects a frame's geometry into one triangle list that a host can upload
//! with [`Vertex::desc`]. Text is not rasterized here; it is queued as
//! [`TextCommand`]s for the host's glyph pass.

use glam::Vec2;

use super::vertex::Vertex;
use super::{Color, DrawContext, shapes, with_alpha};
use crate::settings::QualityPreset;

/// A queued text draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    /// Center anchor in board pixels
    pub pos: Vec2,
    pub size: f32,
    /// Color with the draw alpha already applied
    pub color: Color,
}

/// `DrawContext` that tessellates into vertices
#[derive(Debug, Clone)]
pub struct MeshCanvas {
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextCommand>,
    circle_segments: u32,
    corner_segments: u32,
}

impl Default for MeshCanvas {
    fn default() -> Self {
        Self::new(QualityPreset::default())
    }
}

impl MeshCanvas {
    pub fn new(quality: QualityPreset) -> Self {
        Self {
            vertices: Vec::new(),
            texts: Vec::new(),
            circle_segments: quality.circle_segments(),
            corner_segments: quality.corner_segments(),
        }
    }

    /// Drop last frame's output, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    /// Vertex data ready for a GPU buffer write
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl DrawContext for MeshCanvas {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || color[3] <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::circle(center, radius, color, self.circle_segments));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 || width <= 0.0 || color[3] <= 0.0 {
            return;
        }
        let inner = (radius - width * 0.5).max(0.0);
        let outer = radius + width * 0.5;
        self.vertices
            .extend(shapes::ring(center, inner, outer, color, self.circle_segments));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, corner_radius: f32, color: Color) {
        if size.x <= 0.0 || size.y <= 0.0 || color[3] <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::rounded_rect(
            min,
            size,
            corner_radius,
            color,
            self.corner_segments,
        ));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 || color[3] <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, alpha: f32) {
        if text.is_empty() || alpha <= 0.0 {
            return;
        }
        self.texts.push(TextCommand {
            text: text.to_owned(),
            pos: Vec2::new(x, y),
            size,
            color: with_alpha(color, alpha),
        });
    }
}
