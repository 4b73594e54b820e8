//! Per-frame driver
//!
//! Activation gate, mode activation and the animation step. `step` strings
//! them together with collision and hit resolution in the order a host loop
//! must call them.

use super::collision::{CollisionResult, check_collision};
use super::hit::trigger_hit;
use super::layout::{generate_bumpers, generate_flippers, generate_lanes};
use super::state::{GridPos, PinballState};
use crate::consts::*;

/// Read-only host inputs for a single frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Host tick counter (monotonic)
    pub tick: u64,
    /// Whether the snake game is running
    pub game_started: bool,
    /// Snake segments, head first
    pub snake: &'a [GridPos],
    pub food: GridPos,
}

/// What happened during a `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// The mode switched on this frame
    pub activated: bool,
    /// Head contact; the host applies `points` to its own score
    pub collision: CollisionResult,
}

/// Whether the mode should switch on this tick
///
/// One-shot: never true while the mode is already active.
pub fn should_activate(tick_count: u64, game_started: bool, currently_active: bool) -> bool {
    game_started && !currently_active && tick_count >= ACTIVATION_TICK
}

/// Switch the mode on and lay out the table around the current snake and food
pub fn activate(state: &mut PinballState, tick: u64, snake: &[GridPos], food: GridPos) {
    state.active = true;
    state.activation_tick = tick;
    state.frame = 0;
    state.transition_alpha = 0.0;

    state.bumpers = generate_bumpers(&state.board, snake, food, &mut state.rng);
    state.flippers = generate_flippers(&state.board).to_vec();
    state.lanes = generate_lanes(&state.board);

    log::info!(
        "Pinball mode active at tick {}: {} bumpers on {}x{}",
        tick,
        state.bumpers.len(),
        state.board.width,
        state.board.height
    );
}

/// Advance every animated quantity by one frame
pub fn advance(state: &mut PinballState) {
    if !state.active {
        return;
    }

    state.frame += 1;
    state.transition_alpha = (state.transition_alpha + TRANSITION_STEP).min(1.0);

    if let Some(banner) = state.banner.as_mut() {
        banner.ttl = banner.ttl.saturating_sub(1);
    }
    if state.banner.as_ref().is_some_and(|b| b.ttl == 0) {
        state.banner = None;
    }

    for bumper in &mut state.bumpers {
        bumper.animate();
    }

    // Shared swing keeps both paddles moving in step
    let swing = (state.frame as f32 * FLIPPER_SWING_RATE).sin() * FLIPPER_SWING;
    for flipper in &mut state.flippers {
        flipper.target_angle = flipper.side.base_angle() + swing;
        flipper.ease_toward_target();
        flipper.flash = crate::decay(flipper.flash, FLIPPER_FLASH_DECAY);
    }

    for lane in &mut state.lanes {
        lane.glow_phase += LANE_GLOW_STEP;
    }

    for effect in state.hit_effects.iter_mut() {
        effect.animate();
    }
    state.hit_effects.retain(|e| !e.is_finished());
}

/// Run gate, activation, collision, hit resolution and animation for one frame
pub fn step(state: &mut PinballState, input: &FrameInput) -> StepOutcome {
    let activated = should_activate(input.tick, input.game_started, state.active);
    if activated {
        activate(state, input.tick, input.snake, input.food);
    }

    let collision = match input.snake.first() {
        Some(&head) => check_collision(state, head),
        None => CollisionResult::miss(),
    };
    if let Some(index) = collision.index() {
        trigger_hit(state, index);
    }

    advance(state);

    StepOutcome {
        activated,
        collision,
    }
}
