//! Snake Pinball - A pinball mini-mode overlay for a snake arcade game
//!
//! Core modules:
//! - `sim`: Mode state, layout generation, collisions, hit resolution and animation
//! - `renderer`: Backend-independent draw calls and a vertex mesh backend
//! - `settings`: Visual preferences and board configuration
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::PinballError;
pub use settings::{PinballConfig, QualityPreset, Settings};

use glam::Vec2;

/// Mode tuning constants
pub mod consts {
    /// Ticks since game start before the mode switches on
    pub const ACTIVATION_TICK: u64 = 67;

    /// Bumper field
    pub const MAX_BUMPERS: usize = 6;
    pub const MIN_BUMPER_DIST: f32 = 3.0;
    pub const BUMPER_MARGIN: i32 = 3;
    pub const PLACEMENT_ATTEMPTS: u32 = 200;
    /// Visual radius as a fraction of a cell
    pub const BUMPER_RADIUS: f32 = 0.42;
    pub const BUMPER_PULSE_STEP: f32 = 0.08;
    pub const BUMPER_FLASH_DECAY: f32 = 0.92;

    /// Head-to-bumper distance (grid units) that counts as contact
    pub const HIT_DISTANCE: f32 = 1.5;

    /// Hit effects
    pub const MAX_HIT_EFFECTS: usize = 4;
    pub const EFFECT_LIFE_STEP: f32 = 0.03;
    pub const RING_GROWTH: f32 = 2.5;
    pub const RING_ALPHA_DECAY: f32 = 0.93;
    pub const SPARK_COUNT: usize = 8;
    pub const SPARK_MIN_SPEED: f32 = 2.0;
    pub const SPARK_MAX_SPEED: f32 = 5.0;
    pub const SPARK_JITTER: f32 = 0.2;
    pub const SPARK_GRAVITY: f32 = 0.08;
    pub const SPARK_LIFE_STEP: f32 = 0.04;

    /// Combo banner every N hits, shown for this many frames
    pub const COMBO_INTERVAL: u32 = 5;
    pub const BANNER_FRAMES: u32 = 60;

    /// Flippers
    pub const FLIPPER_BASE_ANGLE: f32 = 0.3;
    pub const FLIPPER_SWING: f32 = 0.25;
    pub const FLIPPER_SWING_RATE: f32 = 0.05;
    pub const FLIPPER_EASE: f32 = 0.15;
    pub const FLIPPER_FLASH_DECAY: f32 = 0.95;

    pub const LANE_GLOW_STEP: f32 = 0.06;

    /// Fade-in step per frame after activation
    pub const TRANSITION_STEP: f32 = 0.02;

    /// Scalars below this snap to zero
    pub const DECAY_EPSILON: f32 = 0.01;
}

/// Euclidean distance between two grid cells, in grid units
#[inline]
pub fn grid_distance(ax: i32, ay: i32, bx: i32, by: i32) -> f32 {
    let dx = (ax - bx) as f32;
    let dy = (ay - by) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Geometric decay that snaps to zero once negligible
#[inline]
pub fn decay(value: f32, factor: f32) -> f32 {
    let next = value * factor;
    if next < consts::DECAY_EPSILON {
        0.0
    } else {
        next
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_distance() {
        assert_eq!(grid_distance(5, 5, 5, 5), 0.0);
        assert_eq!(grid_distance(5, 5, 5, 7), 2.0);
        assert!((grid_distance(0, 0, 3, 4) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_decay_snaps_to_zero() {
        assert_eq!(decay(0.0105, 0.9), 0.0);
        assert!((decay(1.0, 0.92) - 0.92).abs() < f32::EPSILON);
    }
}
