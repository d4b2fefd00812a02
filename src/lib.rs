//! Brickbat - a Breakout-style game simulation core
//!
//! Core modules:
//! - `ecs`: entity-component framework (closed component set, group-tagged
//!   entities, owning manager)
//! - `sim`: deterministic simulation (AABB collision, fixed-timestep driver)
//! - `config`: field tuning supplied by the host at construction
//! - `host`: seams the presentation layer plugs into (render sink, input
//!   snapshot, clock)
//!
//! The crate is a library consumed by a thin host program. The host owns the
//! window, the renderer, and the keyboard; the core owns every tick of the
//! simulation and stays deterministic: fixed timestep only, stable update
//! order, no platform dependencies.

pub mod config;
pub mod ecs;
pub mod host;
pub mod sim;

pub use config::FieldConfig;
pub use host::{Clock, Color, InputSnapshot, InputSource, RenderSink, ShapeDesc};
pub use sim::{Game, RunState};

/// Game timing constants
pub mod consts {
    /// Fixed simulation timestep in seconds (120 Hz for smooth physics)
    pub const FIXED_STEP: f32 = 1.0 / 120.0;
    /// Maximum update cycles consumed per rendered frame to prevent
    /// spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest single frame time fed into the accumulator, in seconds
    pub const MAX_FRAME_TIME: f32 = 0.1;
}
