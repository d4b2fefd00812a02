//! Axis-aligned collision detection and response
//!
//! The interesting part of Brickbat: an inclusive AABB overlap test, the
//! paddle's position-steered reflection, and the brick response that picks
//! the axis of impact from the four raw overlap depths.

use glam::Vec2;

use crate::ecs::entity::Entity;

/// Axis-aligned bounding box described by its edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box spanning `center - half_extents .. center + half_extents`
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            left: center.x - half_extents.x,
            right: center.x + half_extents.x,
            top: center.y - half_extents.y,
            bottom: center.y + half_extents.y,
        }
    }

    /// Bounds of an entity's physics body at its current position.
    /// Panics if the entity has no Position or Physics component.
    pub fn of(entity: &Entity) -> Self {
        Self::from_center(entity.position().value, entity.physics().half_extents)
    }
}

/// Inclusive overlap test: boxes that exactly touch count as intersecting
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.right >= b.left && a.left <= b.right && a.bottom >= b.top && a.top <= b.bottom
}

/// Paddle/ball response.
///
/// The vertical velocity is forced upward at the fixed magnitude and the
/// horizontal sign follows which side of the paddle's center the ball's
/// center is on. Impact angle is ignored: paddle position, not bounce
/// physics, steers the ball.
pub fn resolve_paddle_ball(paddle: &Entity, ball: &mut Entity, ball_speed: f32) {
    let paddle_box = Aabb::of(paddle);
    let ball_box = Aabb::of(ball);
    if !intersects(&paddle_box, &ball_box) {
        return;
    }

    let paddle_center = paddle.position().value.x;
    let ball_center = ball.position().value.x;
    let physics = ball.physics_mut();
    physics.velocity.y = -ball_speed;
    physics.velocity.x = if ball_center < paddle_center {
        -ball_speed
    } else {
        ball_speed
    };
}

/// Brick/ball response.
///
/// The brick dies unconditionally - one brick absorbs exactly one hit
/// regardless of overlap depth. The ball then reflects off the axis of
/// least overlap: per axis, the smaller-magnitude of the two candidate
/// overlap depths tells which side the ball entered from, and the axis
/// with the smaller chosen overlap is the axis of impact. That velocity
/// component is flipped to the fixed magnitude pointing away from the
/// brick.
pub fn resolve_brick_ball(brick: &mut Entity, ball: &mut Entity, ball_speed: f32) {
    let brick_box = Aabb::of(brick);
    let ball_box = Aabb::of(ball);
    if !intersects(&brick_box, &ball_box) {
        return;
    }

    brick.destroy();
    log::debug!("brick {} destroyed", brick.id());

    // Raw penetration depth from each side the ball may have entered from
    let overlap_left = ball_box.right - brick_box.left;
    let overlap_right = brick_box.right - ball_box.left;
    let overlap_top = ball_box.bottom - brick_box.top;
    let overlap_bottom = brick_box.bottom - ball_box.top;

    let from_left = overlap_left.abs() < overlap_right.abs();
    let from_top = overlap_top.abs() < overlap_bottom.abs();

    let min_overlap_x = if from_left { overlap_left } else { overlap_right };
    let min_overlap_y = if from_top { overlap_top } else { overlap_bottom };

    let physics = ball.physics_mut();
    if min_overlap_x.abs() < min_overlap_y.abs() {
        physics.velocity.x = if from_left { -ball_speed } else { ball_speed };
    } else {
        physics.velocity.y = if from_top { -ball_speed } else { ball_speed };
    }
}
