//! The closed component set
//!
//! Components are a tagged union rather than trait objects: the game has
//! exactly four behaviors to attach, so a closed enum dispatched by
//! exhaustive matching in the update/draw loops keeps the uniform
//! update/draw contract without any runtime type machinery. `ComponentKind`
//! doubles as the index into each entity's fixed-size slot table.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::host::{Color, InputSnapshot, ShapeDesc};

/// Identifies each component kind; indexes the per-entity slot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Position,
    Physics,
    Visual,
    PaddleControl,
}

impl ComponentKind {
    /// Number of component kinds; the per-entity slot table is this long
    pub const COUNT: usize = 4;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 2D placement of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub value: Vec2,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            value: Vec2::new(x, y),
        }
    }
}

/// What the physics step does when a bounding edge crosses the field boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryResponse {
    /// Force the velocity sign on the crossed axis to point back into the
    /// field, magnitude preserved. No positional clamping: velocity reversal
    /// alone pulls the body back in bounds over subsequent ticks, so a
    /// single overshoot frame is tolerated.
    ReflectInward,
}

/// Velocity and axis-aligned bounds; integrates the sibling [`Position`]
/// every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Half-width/half-height of the bounding box
    pub half_extents: Vec2,
    /// Optional reaction to crossing the field boundary (only the ball
    /// registers one)
    pub on_out_of_bounds: Option<BoundaryResponse>,
}

impl Physics {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            velocity: Vec2::ZERO,
            half_extents,
            on_out_of_bounds: None,
        }
    }

    pub fn with_velocity(half_extents: Vec2, velocity: Vec2) -> Self {
        Self {
            velocity,
            half_extents,
            on_out_of_bounds: None,
        }
    }

    pub fn with_boundary_response(mut self, response: BoundaryResponse) -> Self {
        self.on_out_of_bounds = Some(response);
        self
    }

    /// Advance the sibling position by one fixed step, then fire the
    /// boundary response at most once per axis for this tick.
    pub fn integrate(&mut self, position: &mut Position, step: f32, field: &FieldConfig) {
        position.value += self.velocity * step;

        let Some(response) = self.on_out_of_bounds else {
            return;
        };
        let crossed = self.boundary_sign(position.value, field);
        match response {
            BoundaryResponse::ReflectInward => {
                if crossed.x != 0.0 {
                    self.velocity.x = self.velocity.x.abs() * -crossed.x;
                }
                if crossed.y != 0.0 {
                    self.velocity.y = self.velocity.y.abs() * -crossed.y;
                }
            }
        }
    }

    /// Sign vector of the field sides the bounding box currently crosses:
    /// -1 for left/top, +1 for right/bottom, 0 for in bounds
    fn boundary_sign(&self, center: Vec2, field: &FieldConfig) -> Vec2 {
        let mut sign = Vec2::ZERO;
        if center.x - self.half_extents.x < 0.0 {
            sign.x = -1.0;
        } else if center.x + self.half_extents.x > field.width {
            sign.x = 1.0;
        }
        if center.y - self.half_extents.y < 0.0 {
            sign.y = -1.0;
        } else if center.y + self.half_extents.y > field.height {
            sign.y = 1.0;
        }
        sign
    }
}

/// Shape drawn at the entity's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeVisual {
    Circle { radius: f32, color: Color },
    Rect { half_extents: Vec2, color: Color },
}

impl ShapeVisual {
    /// Build the draw descriptor for the render sink
    pub fn descriptor(&self, center: Vec2) -> ShapeDesc {
        match *self {
            ShapeVisual::Circle { radius, color } => ShapeDesc::Circle {
                center,
                radius,
                color,
            },
            ShapeVisual::Rect {
                half_extents,
                color,
            } => ShapeDesc::Rect {
                center,
                half_extents,
                color,
            },
        }
    }
}

/// Keyboard steering for the paddle; writes the sibling [`Physics`] velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleControl {
    /// Horizontal speed in pixels per second
    pub speed: f32,
}

impl PaddleControl {
    /// Map held keys to horizontal velocity, refusing to push past either
    /// field edge
    pub fn steer(
        &self,
        physics: &mut Physics,
        position: &Position,
        input: &InputSnapshot,
        field: &FieldConfig,
    ) {
        let left_edge = position.value.x - physics.half_extents.x;
        let right_edge = position.value.x + physics.half_extents.x;
        physics.velocity.x = if input.left && left_edge > 0.0 {
            -self.speed
        } else if input.right && right_edge < field.width {
            self.speed
        } else {
            0.0
        };
    }
}

/// A component attached to an entity: one of the closed set of variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Position(Position),
    Physics(Physics),
    Visual(ShapeVisual),
    PaddleControl(PaddleControl),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Physics(_) => ComponentKind::Physics,
            Component::Visual(_) => ComponentKind::Visual,
            Component::PaddleControl(_) => ComponentKind::PaddleControl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIXED_STEP;

    #[test]
    fn integrate_moves_position() {
        let field = FieldConfig::default();
        let mut position = Position::new(400.0, 300.0);
        let mut physics = Physics::with_velocity(Vec2::splat(10.0), Vec2::new(120.0, -240.0));

        physics.integrate(&mut position, FIXED_STEP, &field);

        assert_eq!(position.value, Vec2::new(401.0, 298.0));
        // No boundary response registered: velocity untouched even in bounds
        assert_eq!(physics.velocity, Vec2::new(120.0, -240.0));
    }

    #[test]
    fn boundary_reflection_flips_sign_preserves_magnitude() {
        let field = FieldConfig::default();
        // left() == -1 with leftward velocity
        let mut position = Position::new(9.0, 300.0);
        let mut physics = Physics::with_velocity(Vec2::splat(10.0), Vec2::new(-480.0, 0.0))
            .with_boundary_response(BoundaryResponse::ReflectInward);

        physics.integrate(&mut position, FIXED_STEP, &field);

        assert_eq!(physics.velocity.x, 480.0);
        assert_eq!(physics.velocity.y, 0.0);
    }

    #[test]
    fn boundary_reflection_handles_both_axes_in_one_tick() {
        let field = FieldConfig::default();
        // Bottom-right corner, moving further out on both axes
        let mut position = Position::new(field.width - 5.0, field.height - 5.0);
        let mut physics = Physics::with_velocity(Vec2::splat(10.0), Vec2::new(480.0, 480.0))
            .with_boundary_response(BoundaryResponse::ReflectInward);

        physics.integrate(&mut position, FIXED_STEP, &field);

        assert_eq!(physics.velocity, Vec2::new(-480.0, -480.0));
    }

    #[test]
    fn without_response_no_reflection_happens() {
        let field = FieldConfig::default();
        let mut position = Position::new(-20.0, 300.0);
        let mut physics = Physics::with_velocity(Vec2::splat(10.0), Vec2::new(-480.0, 0.0));

        physics.integrate(&mut position, FIXED_STEP, &field);

        assert_eq!(physics.velocity.x, -480.0);
    }

    #[test]
    fn paddle_steering_stops_at_field_edges() {
        let field = FieldConfig::default();
        let control = PaddleControl { speed: 360.0 };
        let mut physics = Physics::new(Vec2::new(30.0, 10.0));

        // Mid-field: both directions work
        let position = Position::new(400.0, 550.0);
        control.steer(
            &mut physics,
            &position,
            &InputSnapshot {
                left: true,
                ..Default::default()
            },
            &field,
        );
        assert_eq!(physics.velocity.x, -360.0);

        // Flush against the left edge: the left key is ignored
        let position = Position::new(30.0, 550.0);
        control.steer(
            &mut physics,
            &position,
            &InputSnapshot {
                left: true,
                ..Default::default()
            },
            &field,
        );
        assert_eq!(physics.velocity.x, 0.0);

        // No keys held: velocity zeroed
        let position = Position::new(400.0, 550.0);
        control.steer(&mut physics, &position, &InputSnapshot::default(), &field);
        assert_eq!(physics.velocity.x, 0.0);
    }
}
