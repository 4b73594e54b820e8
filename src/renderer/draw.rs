//! Overlay draw calls
//!
//! Pure readers of [`PinballState`]: nothing here mutates the mode. Every
//! function draws nothing while the mode is inactive, and every alpha is
//! scaled by the fade-in so the table eases onto the board.

use glam::Vec2;

use super::{DrawContext, colors, mix, with_alpha};
use crate::settings::Settings;
use crate::sim::PinballState;

/// Pulse amplitude as a fraction of bumper radius
const PULSE_AMOUNT: f32 = 0.08;
/// Popup rise over an effect's life (pixels)
const POPUP_RISE: f32 = 20.0;
/// Banner fades over its last frames
const BANNER_FADE_FRAMES: f32 = 15.0;

/// Everything, back to front, with default settings
pub fn draw_all(ctx: &mut impl DrawContext, state: &PinballState) {
    draw_all_with(ctx, state, &Settings::default());
}

/// Everything, back to front
pub fn draw_all_with(ctx: &mut impl DrawContext, state: &PinballState, settings: &Settings) {
    draw_lanes(ctx, state);
    draw_flippers(ctx, state, settings);
    draw_bumpers(ctx, state, settings);
    draw_hit_effects(ctx, state, settings);
    draw_banner(ctx, state);
    draw_hud(ctx, state, settings);
}

pub fn draw_lanes(ctx: &mut impl DrawContext, state: &PinballState) {
    if !state.active {
        return;
    }
    let fade = state.transition_alpha;

    for lane in &state.lanes {
        let glow = 0.5 + 0.5 * lane.glow_phase.sin();
        ctx.line(
            lane.start,
            lane.end,
            6.0,
            with_alpha(colors::LANE, 0.15 * glow * fade),
        );
        ctx.line(
            lane.start,
            lane.end,
            2.0,
            with_alpha(colors::LANE, (0.4 + 0.4 * glow) * fade),
        );
    }
}

pub fn draw_bumpers(ctx: &mut impl DrawContext, state: &PinballState, settings: &Settings) {
    if !state.active {
        return;
    }
    let fade = state.transition_alpha;
    let cell = state.board.cell_size;

    for bumper in &state.bumpers {
        let center = state.board.pixel_center(bumper.pos());
        let radius = bumper.radius * cell * (1.0 + PULSE_AMOUNT * bumper.pulse_phase.sin());
        let base = colors::bumper(bumper.color);

        if settings.effective_flashes() && bumper.flash > 0.0 {
            ctx.fill_circle(
                center,
                radius * (1.4 + 0.4 * bumper.flash),
                with_alpha(colors::FLASH, 0.5 * bumper.flash * fade),
            );
        }

        ctx.fill_circle(center, radius, with_alpha(base, fade));
        ctx.stroke_circle(
            center,
            radius * 0.65,
            2.0,
            with_alpha(colors::BUMPER_CORE, fade),
        );
        ctx.draw_text(
            &bumper.points.to_string(),
            center.x,
            center.y,
            cell * 0.4,
            colors::LABEL,
            fade,
        );
    }
}

pub fn draw_flippers(ctx: &mut impl DrawContext, state: &PinballState, settings: &Settings) {
    if !state.active {
        return;
    }
    let fade = state.transition_alpha;

    for flipper in &state.flippers {
        let flash = if settings.effective_flashes() {
            flipper.flash
        } else {
            0.0
        };
        let color = mix(colors::FLIPPER, colors::FLASH, flash);

        ctx.line(
            flipper.pivot,
            flipper.tip(),
            flipper.thickness,
            with_alpha(color, fade),
        );
        // Rounded tip and pivot cap
        ctx.fill_circle(
            flipper.tip(),
            flipper.thickness * 0.5,
            with_alpha(color, fade),
        );
        ctx.fill_circle(
            flipper.pivot,
            flipper.thickness * 0.6,
            with_alpha(colors::FLIPPER_PIVOT, fade),
        );
    }
}

pub fn draw_hit_effects(ctx: &mut impl DrawContext, state: &PinballState, settings: &Settings) {
    if !state.active {
        return;
    }
    let fade = state.transition_alpha;

    for effect in &state.hit_effects {
        for ring in &effect.rings {
            ctx.stroke_circle(
                effect.pos,
                ring.radius,
                2.0,
                with_alpha(colors::RING, ring.alpha * fade),
            );
        }

        if settings.effective_sparks() {
            for spark in &effect.sparks {
                ctx.fill_circle(
                    spark.pos,
                    1.5 + 1.5 * spark.life,
                    with_alpha(colors::SPARK, spark.life * fade),
                );
            }
        }

        if settings.popups && effect.life > 0.0 {
            let rise = (1.0 - effect.life) * POPUP_RISE;
            ctx.draw_text(
                &format!("+{}", effect.points),
                effect.pos.x,
                effect.pos.y - 12.0 - rise,
                14.0,
                colors::POPUP,
                effect.life * fade,
            );
        }
    }
}

pub fn draw_banner(ctx: &mut impl DrawContext, state: &PinballState) {
    if !state.active {
        return;
    }
    let (Some(text), Some(banner)) = (state.banner_text(), state.banner.as_ref()) else {
        return;
    };

    let alpha = (banner.ttl as f32 / BANNER_FADE_FRAMES).min(1.0) * state.transition_alpha;
    let cell = state.board.cell_size;
    let center = Vec2::new(
        state.board.pixel_width() * 0.5,
        state.board.pixel_height() * 0.4,
    );
    let size = Vec2::new(state.board.pixel_width() * 0.7, cell * 2.0);

    ctx.fill_rect(
        center - size * 0.5,
        size,
        cell * 0.5,
        with_alpha(colors::BANNER_BG, 0.7 * alpha),
    );
    ctx.draw_text(
        text,
        center.x,
        center.y,
        cell * 1.1,
        colors::BANNER_TEXT,
        alpha,
    );
}

/// Mode title and running hit counter
pub fn draw_hud(ctx: &mut impl DrawContext, state: &PinballState, settings: &Settings) {
    if !state.active || !settings.hud {
        return;
    }
    let fade = state.transition_alpha;
    let cell = state.board.cell_size;
    let size = cell * 0.7;

    ctx.draw_text(
        "PINBALL",
        cell * 2.5,
        cell * 0.8,
        size,
        colors::HUD_TEXT,
        fade,
    );
    ctx.draw_text(
        &format!("HITS {}", state.total_bumper_hits),
        state.board.pixel_width() - cell * 2.5,
        cell * 0.8,
        size,
        colors::HUD_TEXT,
        fade,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Color;
    use crate::sim::{Board, GridPos, activate, advance, trigger_hit};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Circle(f32),
        Stroke(f32),
        Rect(f32),
        Line(f32),
        Text(String, f32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn alphas(&self) -> impl Iterator<Item = f32> + '_ {
            self.calls.iter().map(|c| match c {
                Call::Circle(a) | Call::Stroke(a) | Call::Rect(a) | Call::Line(a) => *a,
                Call::Text(_, a) => *a,
            })
        }

        fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(t, _) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn circles(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Circle(_)))
                .count()
        }
    }

    impl DrawContext for Recorder {
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, color: Color) {
            self.calls.push(Call::Circle(color[3]));
        }
        fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _width: f32, color: Color) {
            self.calls.push(Call::Stroke(color[3]));
        }
        fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _corner_radius: f32, color: Color) {
            self.calls.push(Call::Rect(color[3]));
        }
        fn line(&mut self, _from: Vec2, _to: Vec2, _width: f32, color: Color) {
            self.calls.push(Call::Line(color[3]));
        }
        fn draw_text(
            &mut self,
            text: &str,
            _x: f32,
            _y: f32,
            _size: f32,
            color: Color,
            alpha: f32,
        ) {
            self.calls.push(Call::Text(text.to_owned(), color[3] * alpha));
        }
    }

    fn active_state() -> PinballState {
        let mut state = PinballState::new(Board::new(20, 20, 20.0), 2024);
        let snake = [GridPos::new(10, 10), GridPos::new(9, 10), GridPos::new(8, 10)];
        activate(&mut state, 67, &snake, GridPos::new(15, 4));
        state
    }

    #[test]
    fn test_inactive_draws_nothing() {
        let mut state = active_state();
        trigger_hit(&mut state, 0);
        state.active = false;

        let mut rec = Recorder::default();
        draw_all(&mut rec, &state);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_alpha_scaled_by_transition() {
        let mut state = active_state();
        for _ in 0..10 {
            advance(&mut state);
        }
        trigger_hit(&mut state, 0);
        let fade = state.transition_alpha;
        assert!(fade > 0.0 && fade < 1.0);

        let mut rec = Recorder::default();
        draw_all(&mut rec, &state);
        assert!(!rec.calls.is_empty());
        assert!(rec.alphas().all(|a| a <= fade + 1e-6));
    }

    #[test]
    fn test_fresh_activation_is_invisible() {
        let state = active_state();
        let mut rec = Recorder::default();
        draw_all(&mut rec, &state);
        assert!(rec.alphas().all(|a| a == 0.0));
    }

    #[test]
    fn test_every_element_is_drawn() {
        let mut state = active_state();
        for _ in 0..60 {
            advance(&mut state);
        }
        for _ in 0..5 {
            trigger_hit(&mut state, 1);
        }

        let mut rec = Recorder::default();
        draw_all(&mut rec, &state);

        let texts = rec.texts();
        assert!(texts.contains(&"5x BUMPER COMBO"));
        assert!(texts.contains(&"HITS 5"));
        assert!(texts.contains(&"PINBALL"));
        let popup = format!("+{}", state.bumpers[1].points);
        assert!(texts.contains(&popup.as_str()));
        assert!(rec.calls.iter().any(|c| matches!(c, Call::Rect(_))));
        assert!(rec.calls.iter().any(|c| matches!(c, Call::Line(_))));
        assert!(rec.calls.iter().any(|c| matches!(c, Call::Stroke(_))));
    }

    #[test]
    fn test_reduced_motion_skips_sparks_and_flash() {
        let mut state = active_state();
        for _ in 0..60 {
            advance(&mut state);
        }
        trigger_hit(&mut state, 0);

        let mut full = Recorder::default();
        draw_hit_effects(&mut full, &state, &Settings::default());
        assert_eq!(full.circles(), state.hit_effects[0].sparks.len());

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut rec = Recorder::default();
        draw_hit_effects(&mut rec, &state, &calm);
        assert_eq!(rec.circles(), 0);

        let mut with_flash = Recorder::default();
        let mut without_flash = Recorder::default();
        draw_bumpers(&mut with_flash, &state, &Settings::default());
        draw_bumpers(&mut without_flash, &state, &calm);
        assert_eq!(with_flash.circles(), without_flash.circles() + 1);
    }

    #[test]
    fn test_hud_toggle() {
        let mut state = active_state();
        advance(&mut state);
        let hidden = Settings {
            hud: false,
            ..Settings::default()
        };
        let mut rec = Recorder::default();
        draw_hud(&mut rec, &state, &hidden);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn test_draw_into_mesh() {
        use crate::renderer::MeshCanvas;

        let mut state = active_state();
        for _ in 0..60 {
            advance(&mut state);
        }
        trigger_hit(&mut state, 0);

        let mut canvas = MeshCanvas::default();
        draw_all(&mut canvas, &state);
        assert!(canvas.triangle_count() > 0);
        assert!(canvas.texts.iter().any(|t| t.text == "HITS 1"));
    }
}
