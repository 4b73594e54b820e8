//! Procedural table layout
//!
//! Bumpers are placed by rejection sampling against an occupancy set; flippers
//! and lanes are fixed fractions of the board and carry no randomness.

use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::state::{BUMPER_PALETTE, Board, Bumper, Flipper, FlipperSide, GridPos, Lane};
use crate::consts::*;

/// Place up to `MAX_BUMPERS` bumpers clear of the snake, the food and each other
///
/// Runs out of attempts gracefully: a crowded board simply gets fewer
/// bumpers, possibly none.
pub fn generate_bumpers<R: Rng>(
    board: &Board,
    snake: &[GridPos],
    food: GridPos,
    rng: &mut R,
) -> Vec<Bumper> {
    let mut bumpers: Vec<Bumper> = Vec::with_capacity(MAX_BUMPERS);

    // Sampling range is [margin, size - margin)
    if board.width <= BUMPER_MARGIN * 2 || board.height <= BUMPER_MARGIN * 2 {
        log::warn!(
            "Board {}x{} too small for bumpers (margin {})",
            board.width,
            board.height,
            BUMPER_MARGIN
        );
        return bumpers;
    }

    let mut occupied: HashSet<GridPos> = snake.iter().copied().collect();
    occupied.insert(food);

    let mut attempts = 0;
    while attempts < PLACEMENT_ATTEMPTS && bumpers.len() < MAX_BUMPERS {
        attempts += 1;

        let candidate = GridPos::new(
            rng.random_range(BUMPER_MARGIN..board.width - BUMPER_MARGIN),
            rng.random_range(BUMPER_MARGIN..board.height - BUMPER_MARGIN),
        );

        if occupied.contains(&candidate) {
            continue;
        }
        if bumpers
            .iter()
            .any(|b| b.pos().distance(candidate) < MIN_BUMPER_DIST)
        {
            continue;
        }

        let (color, points) = BUMPER_PALETTE[bumpers.len() % BUMPER_PALETTE.len()];
        let phase = rng.random_range(0.0..TAU);
        bumpers.push(Bumper::new(candidate, color, points, phase));

        // Reserve the 3x3 neighbourhood
        for dy in -1..=1 {
            for dx in -1..=1 {
                occupied.insert(GridPos::new(candidate.x + dx, candidate.y + dy));
            }
        }
    }

    if bumpers.len() < MAX_BUMPERS {
        log::warn!(
            "Placed {}/{} bumpers after {} attempts",
            bumpers.len(),
            MAX_BUMPERS,
            attempts
        );
    }

    bumpers
}

/// Left and right flippers on a fixed row near the bottom edge
pub fn generate_flippers(board: &Board) -> [Flipper; 2] {
    let cell = board.cell_size;
    let row_y = (board.height as f32 - 2.5) * cell;
    let length = cell * 3.0;
    let thickness = cell * 0.5;

    [
        Flipper::new(
            FlipperSide::Left,
            Vec2::new(board.pixel_width() * 0.25, row_y),
            length,
            thickness,
        ),
        Flipper::new(
            FlipperSide::Right,
            Vec2::new(board.pixel_width() * 0.75, row_y),
            length,
            thickness,
        ),
    ]
}

/// One guide lane hugging each edge: top, right, bottom, left
pub fn generate_lanes(board: &Board) -> Vec<Lane> {
    let w = board.pixel_width();
    let h = board.pixel_height();

    let anchors = [
        (Vec2::new(0.3 * w, 0.08 * h), Vec2::new(0.7 * w, 0.08 * h)),
        (Vec2::new(0.92 * w, 0.25 * h), Vec2::new(0.92 * w, 0.65 * h)),
        (Vec2::new(0.4 * w, 0.94 * h), Vec2::new(0.6 * w, 0.94 * h)),
        (Vec2::new(0.08 * w, 0.25 * h), Vec2::new(0.08 * w, 0.65 * h)),
    ];

    anchors
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| Lane {
            start,
            end,
            // Staggered so the lanes shimmer out of step
            glow_phase: i as f32 * FRAC_PI_2,
        })
        .collect()
}
