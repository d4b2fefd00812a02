//! Entity-component framework
//!
//! A deliberately small engine: entities are bags of components from a
//! closed variant set, tagged into groups for fast queries, owned by a
//! single [`Manager`] that sweeps liveness and dispatches update/draw.

pub mod component;
pub mod entity;
pub mod manager;

pub use component::{
    BoundaryResponse, Component, ComponentKind, PaddleControl, Physics, Position, ShapeVisual,
};
pub use entity::{Entity, Group, TickCtx};
pub use manager::Manager;
