//! Shape tessellation for 2D primitives
//!
//! Every function emits a triangle list.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::Color;
use super::vertex::Vertex;
use crate::polar_to_cartesian;

fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: Color) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn push_quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
    // a-b-c-d in winding order
    push_tri(out, a, b, c, color);
    push_tri(out, a, c, d, color);
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        push_tri(
            &mut vertices,
            center,
            center + polar_to_cartesian(radius, theta1),
            center + polar_to_cartesian(radius, theta2),
            color,
        );
    }

    vertices
}

/// Hollow circle band between two radii
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        push_quad(
            &mut vertices,
            center + polar_to_cartesian(inner_radius, theta1),
            center + polar_to_cartesian(outer_radius, theta1),
            center + polar_to_cartesian(outer_radius, theta2),
            center + polar_to_cartesian(inner_radius, theta2),
            color,
        );
    }

    vertices
}

/// Thick line segment as a quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width * 0.5);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        from + perp,
        to + perp,
        to - perp,
        from - perp,
        color,
    );
    vertices
}

/// Axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
        color,
    );
    vertices
}

/// Rectangle with quarter-circle corners
///
/// The radius is clamped to half the shorter side.
pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    radius: f32,
    color: Color,
    corner_segments: u32,
) -> Vec<Vertex> {
    let radius = radius.min(size.x * 0.5).min(size.y * 0.5);
    if radius <= 0.0 {
        return rect(min, size, color);
    }
    let corner_segments = corner_segments.max(1);
    let max = min + size;

    // Center column plus the two side strips
    let mut vertices = rect(
        Vec2::new(min.x + radius, min.y),
        Vec2::new(size.x - radius * 2.0, size.y),
        color,
    );
    vertices.extend(rect(
        Vec2::new(min.x, min.y + radius),
        Vec2::new(radius, size.y - radius * 2.0),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(max.x - radius, min.y + radius),
        Vec2::new(radius, size.y - radius * 2.0),
        color,
    ));

    // (corner center, start angle) with y pointing down
    let corners = [
        (Vec2::new(max.x - radius, max.y - radius), 0.0),
        (Vec2::new(min.x + radius, max.y - radius), FRAC_PI_2),
        (Vec2::new(min.x + radius, min.y + radius), PI),
        (Vec2::new(max.x - radius, min.y + radius), PI + FRAC_PI_2),
    ];
    for (center, start) in corners {
        for i in 0..corner_segments {
            let t1 = start + (i as f32 / corner_segments as f32) * FRAC_PI_2;
            let t2 = start + ((i + 1) as f32 / corner_segments as f32) * FRAC_PI_2;
            push_tri(
                &mut vertices,
                center,
                center + polar_to_cartesian(radius, t1),
                center + polar_to_cartesian(radius, t2),
                color,
            );
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = [1.0; 4];

    #[test]
    fn test_circle_vertex_count_and_extent() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, WHITE, 16);
        assert_eq!(verts.len(), 16 * 3);
        for v in &verts {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            assert!(d <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_ring_stays_in_band() {
        let verts = ring(Vec2::ZERO, 4.0, 6.0, WHITE, 12);
        assert_eq!(verts.len(), 12 * 6);
        for v in &verts {
            let d = Vec2::from(v.position).length();
            assert!((4.0 - 1e-4..=6.0 + 1e-4).contains(&d));
        }
    }

    #[test]
    fn test_line_width() {
        let verts = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, WHITE);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| v.position[1].abs() <= 2.0 + 1e-5));
        assert!(line(Vec2::ONE, Vec2::ONE, 4.0, WHITE).is_empty());
    }

    #[test]
    fn test_rounded_rect_within_bounds() {
        let min = Vec2::new(10.0, 20.0);
        let size = Vec2::new(100.0, 40.0);
        let verts = rounded_rect(min, size, 8.0, WHITE, 4);
        assert_eq!(verts.len(), 3 * 6 + 4 * 4 * 3);
        for v in &verts {
            assert!(v.position[0] >= min.x - 1e-3 && v.position[0] <= min.x + size.x + 1e-3);
            assert!(v.position[1] >= min.y - 1e-3 && v.position[1] <= min.y + size.y + 1e-3);
        }
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_plain_rect() {
        let verts = rounded_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), 0.0, WHITE, 4);
        assert_eq!(verts, rect(Vec2::ZERO, Vec2::new(4.0, 4.0), WHITE));
    }
}
