//! Snake head vs bumper contact
//!
//! Contact is a plain radius test in grid units. Bumpers are scanned in stored
//! order and the first one in range wins, so an unchanged layout always maps a
//! head position to the same bumper.

use super::state::{GridPos, PinballState};
use crate::consts::HIT_DISTANCE;

/// Result of a contact check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    /// Whether the head touched a bumper
    pub hit: bool,
    /// Points the host should award
    pub points: u32,
    /// Index into `PinballState::bumpers`; read it through [`CollisionResult::index`]
    pub(crate) bumper_index: usize,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            points: 0,
            bumper_index: 0,
        }
    }

    /// Bumper index when this is a hit
    pub fn index(&self) -> Option<usize> {
        self.hit.then_some(self.bumper_index)
    }
}

/// Find the first bumper within contact range of the snake head
pub fn check_collision(state: &PinballState, head: GridPos) -> CollisionResult {
    if !state.active {
        return CollisionResult::miss();
    }

    state
        .bumpers
        .iter()
        .position(|b| b.pos().distance(head) < HIT_DISTANCE)
        .map(|index| CollisionResult {
            hit: true,
            points: state.bumpers[index].points,
            bumper_index: index,
        })
        .unwrap_or_else(CollisionResult::miss)
}
