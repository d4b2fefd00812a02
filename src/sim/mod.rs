//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable update order
//! - No rendering or platform dependencies

pub mod collision;
pub mod game;

pub use collision::{Aabb, intersects, resolve_brick_ball, resolve_paddle_ball};
pub use game::{Game, RunState};
