//! Pinball mode simulation
//!
//! All mode logic lives here. It must stay free of rendering and platform
//! dependencies:
//! - One `advance` per host frame
//! - Seeded RNG only
//! - Stable iteration order (bumpers in placement order, effects oldest first)

pub mod collision;
pub mod hit;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, check_collision};
pub use hit::trigger_hit;
pub use layout::{generate_bumpers, generate_flippers, generate_lanes};
pub use state::{
    BUMPER_PALETTE, Banner, Board, Bumper, BumperColor, Flipper, FlipperSide, GridPos, HitEffect,
    Lane, PinballState, Ring, Spark,
};
pub use tick::{FrameInput, StepOutcome, activate, advance, should_activate, step};
