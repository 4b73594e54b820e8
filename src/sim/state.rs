//! Pinball mode state and entity types
//!
//! Everything the mode owns lives in [`PinballState`]; the host passes it by
//! reference into every operation.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another cell (grid units)
    #[inline]
    pub fn distance(&self, other: GridPos) -> f32 {
        crate::grid_distance(self.x, self.y, other.x, other.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Play field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    /// Width in cells
    pub width: i32,
    /// Height in cells
    pub height: i32,
    /// Cell size in pixels
    pub cell_size: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            cell_size: 20.0,
        }
    }
}

impl Board {
    pub const fn new(width: i32, height: i32, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Board width in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.cell_size
    }

    /// Board height in pixels
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.cell_size
    }

    /// Pixel center of a grid cell
    pub fn pixel_center(&self, pos: GridPos) -> Vec2 {
        Vec2::new(
            (pos.x as f32 + 0.5) * self.cell_size,
            (pos.y as f32 + 0.5) * self.cell_size,
        )
    }
}

/// Bumper color tiers, assigned in placement order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BumperColor {
    Magenta,
    Amber,
    Cyan,
}

/// Palette cycled by placement index: (color, points)
pub const BUMPER_PALETTE: [(BumperColor, u32); 3] = [
    (BumperColor::Magenta, 100),
    (BumperColor::Amber, 50),
    (BumperColor::Cyan, 25),
];

/// A scoring obstacle fixed to one grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bumper {
    pub x: i32,
    pub y: i32,
    /// Visual radius as a fraction of a cell
    pub radius: f32,
    /// Flash intensity (0-1, decays after a hit)
    pub flash: f32,
    pub hit_count: u32,
    /// Pulsation phase (radians, unbounded)
    pub pulse_phase: f32,
    pub color: BumperColor,
    pub points: u32,
}

impl Bumper {
    pub fn new(pos: GridPos, color: BumperColor, points: u32, pulse_phase: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            radius: BUMPER_RADIUS,
            flash: 0.0,
            hit_count: 0,
            pulse_phase,
            color,
            points,
        }
    }

    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Advance pulse and decay flash by one frame
    pub fn animate(&mut self) {
        self.pulse_phase += BUMPER_PULSE_STEP;
        self.flash = crate::decay(self.flash, BUMPER_FLASH_DECAY);
    }
}

/// Which side of the board a flipper sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

impl FlipperSide {
    /// Resting angle for this side (radians)
    pub fn base_angle(&self) -> f32 {
        match self {
            FlipperSide::Left => FLIPPER_BASE_ANGLE,
            FlipperSide::Right => -FLIPPER_BASE_ANGLE,
        }
    }

    /// Direction the paddle extends from its pivot (+1 right, -1 left)
    pub fn direction(&self) -> f32 {
        match self {
            FlipperSide::Left => 1.0,
            FlipperSide::Right => -1.0,
        }
    }
}

/// One of the two decorative paddles near the bottom edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    /// Pivot in pixels
    pub pivot: Vec2,
    /// Paddle length in pixels
    pub length: f32,
    /// Paddle thickness in pixels
    pub thickness: f32,
    /// Current angle (radians)
    pub angle: f32,
    /// Angle the paddle eases toward
    pub target_angle: f32,
    pub flash: f32,
}

impl Flipper {
    pub fn new(side: FlipperSide, pivot: Vec2, length: f32, thickness: f32) -> Self {
        let angle = side.base_angle();
        Self {
            side,
            pivot,
            length,
            thickness,
            angle,
            target_angle: angle,
            flash: 0.0,
        }
    }

    /// Move the angle a fixed fraction of the remaining gap toward the target
    pub fn ease_toward_target(&mut self) {
        self.angle += (self.target_angle - self.angle) * FLIPPER_EASE;
    }

    /// Tip position in pixels
    pub fn tip(&self) -> Vec2 {
        let dir = Vec2::new(self.angle.cos(), self.angle.sin()) * self.side.direction();
        self.pivot + dir * self.length
    }
}

/// A decorative glowing guide line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub start: Vec2,
    pub end: Vec2,
    /// Glow phase (radians, unbounded)
    pub glow_phase: f32,
}

/// Expanding ring of a hit effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub radius: f32,
    pub alpha: f32,
}

/// Gravity-affected spark of a hit effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Transient celebration spawned when a bumper is hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitEffect {
    /// Pixel position of the bumper that was hit
    pub pos: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub rings: Vec<Ring>,
    pub sparks: Vec<Spark>,
    /// Score popup value
    pub points: u32,
}

impl HitEffect {
    /// Advance rings, sparks and life by one frame
    pub fn animate(&mut self) {
        self.life = (self.life - EFFECT_LIFE_STEP).max(0.0);

        for ring in &mut self.rings {
            ring.radius += RING_GROWTH;
            ring.alpha = crate::decay(ring.alpha, RING_ALPHA_DECAY);
        }
        self.rings.retain(|r| r.alpha > 0.0);

        for spark in &mut self.sparks {
            spark.pos += spark.vel;
            spark.vel.y += SPARK_GRAVITY;
            spark.life = (spark.life - SPARK_LIFE_STEP).max(0.0);
        }
        self.sparks.retain(|s| s.life > 0.0);
    }

    /// Finished once life is spent and every spark has burned out
    pub fn is_finished(&self) -> bool {
        self.life <= 0.0 && self.sparks.is_empty()
    }
}

/// Transient combo banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// Frames remaining
    pub ttl: u32,
}

/// Complete mode state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinballState {
    /// Whether the mode is on; the host may clear it (see [`PinballState::reset`])
    pub active: bool,
    /// Host tick at which the mode switched on
    pub activation_tick: u64,
    pub board: Board,
    pub bumpers: Vec<Bumper>,
    /// Oldest first
    pub hit_effects: VecDeque<HitEffect>,
    /// Left then right; empty until activation
    pub flippers: Vec<Flipper>,
    pub lanes: Vec<Lane>,
    /// Frames advanced since activation
    pub frame: u64,
    /// Fade-in (0 on activation, rises to 1)
    pub transition_alpha: f32,
    /// Resolved hits since activation (never decreases)
    pub total_bumper_hits: u32,
    pub banner: Option<Banner>,
    /// Seed the random source was created from
    pub seed: u64,
    /// Saved with its stream position so a reloaded state keeps drawing the same values
    pub(crate) rng: Pcg32,
}

impl PinballState {
    /// Create an inactive state for the given board and seed
    pub fn new(board: Board, seed: u64) -> Self {
        Self {
            active: false,
            activation_tick: 0,
            board,
            bumpers: Vec::new(),
            hit_effects: VecDeque::with_capacity(MAX_HIT_EFFECTS),
            flippers: Vec::with_capacity(2),
            lanes: Vec::new(),
            frame: 0,
            transition_alpha: 0.0,
            total_bumper_hits: 0,
            banner: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Discard all mode content and switch the mode off
    ///
    /// The random source keeps its position so a later activation draws a
    /// fresh layout.
    pub fn reset(&mut self) {
        self.active = false;
        self.activation_tick = 0;
        self.bumpers.clear();
        self.hit_effects.clear();
        self.flippers.clear();
        self.lanes.clear();
        self.frame = 0;
        self.transition_alpha = 0.0;
        self.total_bumper_hits = 0;
        self.banner = None;
    }

    /// Banner text while it is still showing
    pub fn banner_text(&self) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|b| b.ttl > 0)
            .map(|b| b.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::generate_bumpers;
    use approx::assert_relative_eq;

    #[test]
    fn test_board_pixel_center() {
        let board = Board::new(20, 20, 20.0);
        assert_eq!(board.pixel_center(GridPos::new(0, 0)), Vec2::new(10.0, 10.0));
        assert_eq!(board.pixel_center(GridPos::new(5, 7)), Vec2::new(110.0, 150.0));
        assert_eq!(board.pixel_width(), 400.0);
    }

    #[test]
    fn test_bumper_flash_decays_to_zero() {
        let mut bumper = Bumper::new(GridPos::new(4, 4), BumperColor::Amber, 50, 0.0);
        bumper.flash = 1.0;
        let mut prev = bumper.flash;
        for _ in 0..100 {
            bumper.animate();
            assert!(bumper.flash <= prev);
            assert!(bumper.flash >= 0.0);
            prev = bumper.flash;
        }
        assert_eq!(bumper.flash, 0.0);
    }

    #[test]
    fn test_flipper_eases_toward_fixed_target() {
        let mut flipper = Flipper::new(FlipperSide::Left, Vec2::new(100.0, 360.0), 60.0, 10.0);
        flipper.angle = -1.0;
        flipper.target_angle = 0.5;

        let mut gap = (flipper.angle - flipper.target_angle).abs();
        let mut frames = 0;
        while gap > 1e-3 {
            flipper.ease_toward_target();
            let next = (flipper.angle - flipper.target_angle).abs();
            assert!(next < gap, "gap must shrink every frame");
            gap = next;
            frames += 1;
            assert!(frames < 100);
        }
    }

    #[test]
    fn test_flipper_tip_mirrors_by_side() {
        let left = Flipper::new(FlipperSide::Left, Vec2::new(100.0, 300.0), 50.0, 8.0);
        let right = Flipper::new(FlipperSide::Right, Vec2::new(300.0, 300.0), 50.0, 8.0);
        assert!(left.tip().x > left.pivot.x);
        assert!(right.tip().x < right.pivot.x);
        // Resting paddles droop toward the drain
        assert!(left.tip().y > left.pivot.y);
        assert!(right.tip().y > right.pivot.y);
        assert!((left.tip().y - right.tip().y).abs() < 1e-3);
    }

    #[test]
    fn test_reset_clears_mode() {
        let mut state = PinballState::new(Board::default(), 7);
        state.active = true;
        state.total_bumper_hits = 12;
        state.transition_alpha = 0.6;
        state.banner = Some(Banner {
            text: "10x BUMPER COMBO".into(),
            ttl: 30,
        });
        state.reset();
        assert!(!state.active);
        assert_eq!(state.total_bumper_hits, 0);
        assert_eq!(state.transition_alpha, 0.0);
        assert!(state.banner_text().is_none());
    }

    #[test]
    fn test_banner_text_hidden_at_zero_ttl() {
        let mut state = PinballState::new(Board::default(), 1);
        state.banner = Some(Banner {
            text: "5x BUMPER COMBO".into(),
            ttl: 0,
        });
        assert!(state.banner_text().is_none());
        if let Some(banner) = state.banner.as_mut() {
            banner.ttl = 3;
        }
        assert_eq!(state.banner_text(), Some("5x BUMPER COMBO"));
    }

    #[test]
    fn test_hit_effect_single_frame() {
        let mut effect = HitEffect {
            pos: Vec2::new(100.0, 100.0),
            life: 1.0,
            rings: vec![
                Ring {
                    radius: 5.0,
                    alpha: 1.0,
                },
                Ring {
                    radius: 3.0,
                    alpha: 0.7,
                },
            ],
            sparks: vec![Spark {
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::new(3.0, -0.5),
                life: 1.0,
            }],
            points: 100,
        };

        effect.animate();

        assert_relative_eq!(effect.life, 1.0 - EFFECT_LIFE_STEP);
        assert_eq!(effect.rings.len(), 2);
        assert_relative_eq!(effect.rings[0].radius, 7.5);
        assert_relative_eq!(effect.rings[0].alpha, 0.93);
        assert_relative_eq!(effect.rings[1].radius, 5.5);
        assert_relative_eq!(effect.rings[1].alpha, 0.7 * 0.93);

        let spark = &effect.sparks[0];
        // Moves by the old velocity, then gravity pulls it down
        assert_relative_eq!(spark.pos.x, 103.0);
        assert_relative_eq!(spark.pos.y, 99.5);
        assert_relative_eq!(spark.vel.x, 3.0);
        assert_relative_eq!(spark.vel.y, -0.5 + 0.08);
        assert_relative_eq!(spark.life, 0.96);
    }

    #[test]
    fn test_serde_roundtrip_keeps_random_stream() {
        let board = Board::new(20, 20, 20.0);
        let original = PinballState::new(board, 2024);
        let json = serde_json::to_string(&original).unwrap();
        let mut restored: PinballState = serde_json::from_str(&json).unwrap();
        let mut original = original;

        assert_eq!(restored.seed, 2024);

        let snake = [GridPos::new(10, 10), GridPos::new(9, 10)];
        let food = GridPos::new(15, 4);
        let layout = |state: &mut PinballState| -> Vec<(GridPos, u32)> {
            generate_bumpers(&board, &snake, food, &mut state.rng)
                .iter()
                .map(|b| (b.pos(), b.points))
                .collect()
        };
        let a = layout(&mut original);
        assert!(!a.is_empty());
        assert_eq!(a, layout(&mut restored));
    }
}
