//! Field population and the fixed-timestep game driver
//!
//! `Game` owns the entity graph and the time debt. The host feeds it one
//! frame's elapsed time plus an input snapshot; the driver consumes the
//! debt in fixed-size steps, running zero or more full update cycles per
//! rendered frame so the simulation advances identically at any frame rate.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::consts::{FIXED_STEP, MAX_FRAME_TIME, MAX_SUBSTEPS};
use crate::ecs::component::{
    BoundaryResponse, Component, PaddleControl, Physics, Position, ShapeVisual,
};
use crate::ecs::entity::{Group, TickCtx};
use crate::ecs::manager::Manager;
use crate::host::{Clock, Color, InputSnapshot, InputSource, RenderSink};
use crate::sim::collision::{resolve_brick_ball, resolve_paddle_ball};

const BALL_COLOR: Color = [1.0, 0.2, 0.2, 1.0];
const PADDLE_COLOR: Color = [0.8, 0.1, 0.1, 1.0];
const BRICK_COLOR: Color = [0.9, 0.9, 0.2, 1.0];

/// Where the run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Simulation advancing normally
    Running,
    /// Frozen; update cycles are suspended until unpaused
    Paused,
    /// Terminal: cancel key or host close. No further cycles run.
    Stopped,
}

/// The whole simulation: entity graph, timing debt, and run state
pub struct Game {
    manager: Manager,
    config: FieldConfig,
    state: RunState,
    accumulator: f32,
}

impl Game {
    /// Build the field: paddle, ball, and the brick grid
    pub fn new(config: FieldConfig) -> Self {
        config.validate();
        let mut game = Self {
            manager: Manager::new(),
            config,
            state: RunState::Running,
            accumulator: 0.0,
        };
        game.spawn_paddle();
        game.spawn_ball();
        game.spawn_bricks();
        log::info!(
            "field ready: {}x{}, {} bricks",
            game.config.width,
            game.config.height,
            game.manager.entities_by_group(Group::Brick).len()
        );
        game
    }

    fn spawn_paddle(&mut self) {
        let half = Vec2::new(self.config.paddle_width, self.config.paddle_height) / 2.0;
        let index = self.manager.add_entity();
        let entity = self.manager.entity_mut(index);
        entity.add_component(Component::Position(Position::new(
            self.config.width / 2.0,
            self.config.height - self.config.paddle_inset,
        )));
        entity.add_component(Component::Physics(Physics::new(half)));
        entity.add_component(Component::Visual(ShapeVisual::Rect {
            half_extents: half,
            color: PADDLE_COLOR,
        }));
        entity.add_component(Component::PaddleControl(PaddleControl {
            speed: self.config.paddle_speed,
        }));
        self.manager.add_to_group(index, Group::Paddle);
    }

    fn spawn_ball(&mut self) {
        let radius = self.config.ball_radius;
        let speed = self.config.ball_speed;
        let index = self.manager.add_entity();
        let entity = self.manager.entity_mut(index);
        entity.add_component(Component::Position(Position::new(
            self.config.width / 2.0,
            self.config.height / 2.0,
        )));
        entity.add_component(Component::Physics(
            Physics::with_velocity(Vec2::splat(radius), Vec2::new(-speed, -speed))
                .with_boundary_response(BoundaryResponse::ReflectInward),
        ));
        entity.add_component(Component::Visual(ShapeVisual::Circle {
            radius,
            color: BALL_COLOR,
        }));
        self.manager.add_to_group(index, Group::Ball);
    }

    fn spawn_bricks(&mut self) {
        let half = Vec2::new(self.config.brick_width, self.config.brick_height) / 2.0;
        for iy in 0..self.config.bricks_y {
            for ix in 0..self.config.bricks_x {
                let x = (ix as f32 + 1.0) * (self.config.brick_width + self.config.brick_spacing);
                let y = (iy as f32 + 2.0) * (self.config.brick_height + self.config.brick_spacing);
                let index = self.manager.add_entity();
                let entity = self.manager.entity_mut(index);
                entity.add_component(Component::Position(Position::new(x, y)));
                entity.add_component(Component::Physics(Physics::new(half)));
                entity.add_component(Component::Visual(ShapeVisual::Rect {
                    half_extents: half,
                    color: BRICK_COLOR,
                }));
                self.manager.add_to_group(index, Group::Brick);
            }
        }
    }

    /// Feed one rendered frame's elapsed time and input into the simulation.
    ///
    /// Cancel and pause are honored at the frame boundary only, never
    /// mid-cycle, so a cycle that starts always completes. The elapsed time
    /// is clamped, accumulated as debt, and consumed in fixed steps up to
    /// the substep cap; leftover debt past the cap is shed rather than
    /// allowed to snowball.
    pub fn advance(&mut self, elapsed: f32, input: &InputSnapshot) {
        if input.cancel {
            self.stop();
            return;
        }
        if input.pause {
            self.state = match self.state {
                RunState::Running => RunState::Paused,
                RunState::Paused => RunState::Running,
                RunState::Stopped => RunState::Stopped,
            };
        }
        if self.state != RunState::Running {
            return;
        }

        self.accumulator += elapsed.min(MAX_FRAME_TIME);
        let mut substeps = 0;
        while self.accumulator >= FIXED_STEP && substeps < MAX_SUBSTEPS {
            self.step(input);
            self.accumulator -= FIXED_STEP;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= FIXED_STEP {
            log::debug!("shedding {:.1}ms of frame debt", self.accumulator * 1000.0);
            self.accumulator = 0.0;
        }
    }

    /// One full update cycle at the fixed step: refresh the group caches,
    /// update every entity, then run the pairwise collision tests against
    /// the freshly refreshed groups
    pub fn step(&mut self, input: &InputSnapshot) {
        let ctx = TickCtx {
            input: *input,
            field: &self.config,
        };
        self.manager.refresh();
        self.manager.update(FIXED_STEP, &ctx);
        self.resolve_collisions();
    }

    fn resolve_collisions(&mut self) {
        let balls = self.manager.entities_by_group(Group::Ball).to_vec();
        let paddles = self.manager.entities_by_group(Group::Paddle).to_vec();
        let bricks = self.manager.entities_by_group(Group::Brick).to_vec();
        let speed = self.config.ball_speed;

        for &ball in &balls {
            for &paddle in &paddles {
                let (paddle, ball) = self.manager.pair_mut(paddle, ball);
                resolve_paddle_ball(paddle, ball, speed);
            }
            for &brick in &bricks {
                let (brick, ball) = self.manager.pair_mut(brick, ball);
                resolve_brick_ball(brick, ball, speed);
            }
        }
    }

    /// Draw pass, delegated to the presentation layer through the sink
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        self.manager.draw(sink);
    }

    /// Drive the loop with host-supplied clock, input, and renderer until
    /// the run stops. Frame pacing is the host's business: this loop runs
    /// as fast as the clock reports time.
    pub fn run<C, I, R>(&mut self, clock: &mut C, input: &mut I, sink: &mut R)
    where
        C: Clock,
        I: InputSource,
        R: RenderSink,
    {
        while self.is_running() {
            let snapshot = input.sample();
            self.advance(clock.elapsed(), &snapshot);
            self.draw(sink);
        }
    }

    /// End the run. Terminal and idempotent.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            log::info!("simulation stopped");
            self.state = RunState::Stopped;
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Whether the host should keep driving frames (paused still counts)
    pub fn is_running(&self) -> bool {
        self.state != RunState::Stopped
    }

    /// Bricks still standing
    pub fn brick_count(&self) -> usize {
        self.manager
            .entities_by_group(Group::Brick)
            .iter()
            .filter(|&&index| self.manager.entity(index).is_alive())
            .count()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }
}
