//! Brickbat headless demo host
//!
//! The thinnest possible presentation layer: a scripted input source, a
//! counting render sink, and a fixed clock. Useful for exercising the whole
//! simulation loop without a window, and as a template for a real host.

use std::time::Instant;

use brickbat::consts::FIXED_STEP;
use brickbat::{Clock, FieldConfig, Game, InputSnapshot, InputSource, RenderSink, ShapeDesc};

/// Counts draw submissions instead of rendering them
#[derive(Default)]
struct CountingSink {
    shapes: u64,
}

impl RenderSink for CountingSink {
    fn submit(&mut self, _shape: ShapeDesc) {
        self.shapes += 1;
    }
}

/// Scripted input: sweep the paddle back and forth, then quit
struct ScriptedInput {
    frames: u32,
    run_frames: u32,
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        self.frames += 1;
        InputSnapshot {
            left: self.frames % 480 >= 240,
            right: self.frames % 480 < 240,
            cancel: self.frames > self.run_frames,
            pause: false,
        }
    }
}

/// Every demo frame is exactly one simulation step, so the run is
/// reproducible regardless of how fast the machine executes it
struct FixedClock;

impl Clock for FixedClock {
    fn elapsed(&mut self) -> f32 {
        FIXED_STEP
    }
}

fn main() {
    env_logger::init();
    log::info!("Brickbat demo host starting");

    let config = FieldConfig::default();
    let mut game = Game::new(config);
    let bricks_at_start = game.brick_count();

    let mut clock = FixedClock;
    let mut input = ScriptedInput {
        frames: 0,
        run_frames: 30 * 120, // 30 simulated seconds
    };
    let mut sink = CountingSink::default();

    let started = Instant::now();
    game.run(&mut clock, &mut input, &mut sink);

    println!(
        "simulated {} frames in {:.0?}: {}/{} bricks destroyed, {} shapes submitted",
        input.frames,
        started.elapsed(),
        bricks_at_start - game.brick_count(),
        bricks_at_start,
        sink.shapes,
    );
}
