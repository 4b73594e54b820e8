//! Bumper hit resolution
//!
//! Registers a contact reported by the collision check: flashes the bumper,
//! bumps the counters, spawns the ring/spark effect and raises the combo banner.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Banner, HitEffect, PinballState, Ring, Spark};
use crate::consts::*;

/// Register a hit on `bumper_index`
///
/// An index that does not name a bumper is ignored.
pub fn trigger_hit(state: &mut PinballState, bumper_index: usize) {
    let Some(bumper) = state.bumpers.get_mut(bumper_index) else {
        log::warn!(
            "Ignoring hit on bumper {} ({} bumpers)",
            bumper_index,
            state.bumpers.len()
        );
        return;
    };

    bumper.flash = 1.0;
    bumper.hit_count += 1;
    let pos = state.board.pixel_center(bumper.pos());
    let points = bumper.points;

    state.total_bumper_hits += 1;
    log::debug!(
        "Bumper {} hit ({} total, +{})",
        bumper_index,
        state.total_bumper_hits,
        points
    );

    // Oldest effect makes room
    while state.hit_effects.len() >= MAX_HIT_EFFECTS {
        state.hit_effects.pop_front();
    }
    let effect = spawn_effect(pos, points, &mut state.rng);
    state.hit_effects.push_back(effect);

    if state.total_bumper_hits.is_multiple_of(COMBO_INTERVAL) {
        let text = format!("{}x BUMPER COMBO", state.total_bumper_hits);
        log::info!("{}", text);
        state.banner = Some(Banner {
            text,
            ttl: BANNER_FRAMES,
        });
        for flipper in &mut state.flippers {
            flipper.flash = 1.0;
        }
    }
}

/// Two rings and an even fan of sparks with a little jitter
fn spawn_effect<R: Rng>(pos: Vec2, points: u32, rng: &mut R) -> HitEffect {
    let rings = vec![
        Ring {
            radius: 5.0,
            alpha: 1.0,
        },
        Ring {
            radius: 3.0,
            alpha: 0.7,
        },
    ];

    let sparks = (0..SPARK_COUNT)
        .map(|i| {
            let angle = i as f32 * TAU / SPARK_COUNT as f32
                + rng.random_range(-SPARK_JITTER..SPARK_JITTER);
            let speed = rng.random_range(SPARK_MIN_SPEED..SPARK_MAX_SPEED);
            Spark {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
            }
        })
        .collect();

    HitEffect {
        pos,
        life: 1.0,
        rings,
        sparks,
        points,
    }
}
