//! Snake Pinball headless demo
//!
//! Drives a scripted snake through the mode and tessellates every frame, then
//! reports what happened. Pass a JSON config path to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
use snake_pinball::{
    PinballConfig,
    renderer::{MeshCanvas, draw_all_with},
    sim::{FrameInput, GridPos, PinballState, step},
};

/// Frames to simulate
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u64 = 400;
#[cfg(not(target_arch = "wasm32"))]
const SNAKE_LENGTH: usize = 4;

/// Boustrophedon sweep: left-to-right on even rows, back on odd ones,
/// stepping down two rows at each wall and wrapping to the top
#[cfg(not(target_arch = "wasm32"))]
fn next_head(head: GridPos, heading: i32, width: i32, height: i32) -> (GridPos, i32) {
    let next_x = head.x + heading;
    if next_x >= 1 && next_x < width - 1 {
        return (GridPos::new(next_x, head.y), heading);
    }
    let mut next_y = head.y + 2;
    if next_y >= height - 1 {
        next_y = 1;
    }
    (GridPos::new(head.x, next_y), -heading)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> PinballConfig {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("No config given, using defaults");
        return PinballConfig::default();
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    };
    match PinballConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Bad config {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Pinball (native demo) starting...");

    let config = load_config();
    let board = config.board;
    let mut state = PinballState::new(board, config.seed);
    let mut canvas = MeshCanvas::new(config.settings.quality);

    let mut snake: Vec<GridPos> = (0..SNAKE_LENGTH as i32)
        .map(|i| GridPos::new(SNAKE_LENGTH as i32 - i, 1))
        .collect();
    let mut heading = 1;
    let food = GridPos::new(board.width / 2, board.height / 2);

    let mut score: u64 = 0;
    let mut peak_triangles = 0;
    let mut peak_effects = 0;

    for tick in 0..DEMO_FRAMES {
        let input = FrameInput {
            tick,
            game_started: true,
            snake: &snake,
            food,
        };
        let outcome = step(&mut state, &input);
        if outcome.activated {
            println!("Pinball mode switched on at tick {}", tick);
        }
        if outcome.collision.hit {
            score += outcome.collision.points as u64;
        }

        canvas.clear();
        draw_all_with(&mut canvas, &state, &config.settings);
        peak_triangles = peak_triangles.max(canvas.triangle_count());
        peak_effects = peak_effects.max(state.hit_effects.len());

        let (head, next_heading) = next_head(snake[0], heading, board.width, board.height);
        heading = next_heading;
        snake.insert(0, head);
        snake.truncate(SNAKE_LENGTH);
    }

    println!("\nAfter {} frames:", DEMO_FRAMES);
    println!("  bumpers:        {}", state.bumpers.len());
    println!("  bumper hits:    {}", state.total_bumper_hits);
    println!("  score awarded:  {}", score);
    println!("  peak effects:   {}", peak_effects);
    println!("  peak triangles: {}", peak_triangles);
    println!("  fade-in:        {:.2}", state.transition_alpha);

    match serde_json::to_string_pretty(&state.bumpers) {
        Ok(json) => println!("\nBumper layout:\n{}", json),
        Err(e) => log::warn!("Could not serialize layout: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; the host game embeds the crate directly
}
