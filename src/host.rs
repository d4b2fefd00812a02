//! Seams between the simulation core and the presentation layer
//!
//! The core never opens a window, draws a pixel, or reads the keyboard. The
//! host implements these three traits and hands them to [`crate::Game`]:
//! shapes flow out through [`RenderSink`], key state flows in through
//! [`InputSource`], and frame timing comes from [`Clock`].

use glam::Vec2;

/// RGBA color with 0.0-1.0 channels
pub type Color = [f32; 4];

/// One shape the core wants drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rect {
        center: Vec2,
        half_extents: Vec2,
        color: Color,
    },
}

/// Draw-call receiver implemented by the presentation layer
pub trait RenderSink {
    /// Accept one shape for the current frame. Must not fail.
    fn submit(&mut self, shape: ShapeDesc);
}

/// Key state sampled once per frame and read once per update cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Move-left key currently held
    pub left: bool,
    /// Move-right key currently held
    pub right: bool,
    /// Cancel/quit key currently held
    pub cancel: bool,
    /// Pause toggle (one-shot; the host clears it once the frame consumed it)
    pub pause: bool,
}

/// Provider of the current key state; sampling must be side-effect free
/// within a frame
pub trait InputSource {
    fn sample(&mut self) -> InputSnapshot;
}

/// Monotonic elapsed-time source between successive frame boundaries
pub trait Clock {
    /// Seconds since the previous call
    fn elapsed(&mut self) -> f32;
}
