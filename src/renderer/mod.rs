//! Rendering module
//!
//! Draw calls go through the [`DrawContext`] capability so the overlay does not
//! depend on a particular graphics backend. `MeshCanvas` is the bundled
//! backend: it tessellates into WebGPU-ready vertices.

pub mod draw;
pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use draw::{
    draw_all, draw_all_with, draw_banner, draw_bumpers, draw_flippers, draw_hit_effects, draw_hud,
    draw_lanes,
};
pub use mesh::{MeshCanvas, TextCommand};
pub use vertex::Vertex;

use glam::Vec2;

/// Linear RGBA, components in 0-1
pub type Color = [f32; 4];

/// Drawing capability supplied by the host
///
/// Coordinates are board pixels. Text is anchored at its center.
pub trait DrawContext {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Axis-aligned rectangle; `corner_radius` of 0 means square corners
    fn fill_rect(&mut self, min: Vec2, size: Vec2, corner_radius: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, alpha: f32);
}

/// Scale a color's alpha
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Blend toward `to` by `t` (alpha taken from `from`)
#[inline]
pub fn mix(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
        from[3],
    ]
}

/// Colors for overlay elements
pub mod colors {
    use super::Color;
    use crate::sim::BumperColor;

    pub const BUMPER_MAGENTA: Color = [1.0, 0.25, 0.75, 1.0];
    pub const BUMPER_AMBER: Color = [1.0, 0.7, 0.15, 1.0];
    pub const BUMPER_CYAN: Color = [0.2, 0.9, 1.0, 1.0];
    pub const BUMPER_CORE: Color = [1.0, 1.0, 1.0, 0.6];
    pub const FLASH: Color = [1.0, 1.0, 1.0, 1.0];
    pub const FLIPPER: Color = [0.35, 0.55, 1.0, 1.0];
    pub const FLIPPER_PIVOT: Color = [0.85, 0.85, 0.95, 1.0];
    pub const LANE: Color = [0.4, 1.0, 0.6, 1.0];
    pub const RING: Color = [1.0, 0.95, 0.6, 1.0];
    pub const SPARK: Color = [1.0, 0.8, 0.3, 1.0];
    pub const POPUP: Color = [1.0, 1.0, 0.5, 1.0];
    pub const BANNER_BG: Color = [0.05, 0.0, 0.12, 1.0];
    pub const BANNER_TEXT: Color = [1.0, 0.4, 0.9, 1.0];
    pub const HUD_TEXT: Color = [0.8, 0.85, 1.0, 1.0];
    pub const LABEL: Color = [0.05, 0.05, 0.1, 1.0];

    pub fn bumper(color: BumperColor) -> Color {
        match color {
            BumperColor::Magenta => BUMPER_MAGENTA,
            BumperColor::Amber => BUMPER_AMBER,
            BumperColor::Cyan => BUMPER_CYAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_scales_and_clamps() {
        assert_eq!(with_alpha([1.0, 0.5, 0.0, 0.8], 0.5), [1.0, 0.5, 0.0, 0.4]);
        assert_eq!(with_alpha(colors::FLASH, 2.0)[3], 1.0);
        assert_eq!(with_alpha(colors::FLASH, -1.0)[3], 0.0);
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix(colors::FLIPPER, colors::FLASH, 0.0), colors::FLIPPER);
        let full = mix(colors::FLIPPER, colors::FLASH, 1.0);
        assert_eq!(&full[..3], &colors::FLASH[..3]);
        assert_eq!(full[3], colors::FLIPPER[3]);
    }
}
