//! Field configuration supplied by the host
//!
//! Every tuning constant the simulation needs - field dimensions, brick grid
//! layout, paddle and ball sizes/speeds - is fixed here at construction time
//! and never mutated at runtime.

use serde::{Deserialize, Serialize};

/// Complete field tuning for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    // === Field ===
    /// Playfield width in pixels
    pub width: f32,
    /// Playfield height in pixels
    pub height: f32,

    // === Brick grid ===
    /// Number of brick columns
    pub bricks_x: u32,
    /// Number of brick rows
    pub bricks_y: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Gap between neighboring bricks
    pub brick_spacing: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal paddle speed in pixels per second
    pub paddle_speed: f32,
    /// Distance from the bottom edge to the paddle center
    pub paddle_inset: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Per-axis ball speed in pixels per second; the magnitude never changes
    /// after launch, only the sign of each component
    pub ball_speed: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,

            bricks_x: 11,
            bricks_y: 4,
            brick_width: 60.0,
            brick_height: 20.0,
            brick_spacing: 3.0,

            paddle_width: 60.0,
            paddle_height: 20.0,
            paddle_speed: 360.0,
            paddle_inset: 50.0,

            ball_radius: 10.0,
            ball_speed: 480.0,
        }
    }
}

impl FieldConfig {
    /// Parse a host-supplied JSON configuration
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse host-supplied JSON, falling back to defaults on failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("invalid field config ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Panics when the field cannot host a game. Configuration is fixed at
    /// construction, so a bad value is a wiring bug in the host, not a
    /// recoverable runtime error.
    pub fn validate(&self) {
        assert!(
            self.width > 0.0 && self.height > 0.0,
            "field dimensions must be positive"
        );
        assert!(
            self.bricks_x > 0 && self.bricks_y > 0,
            "brick grid must be non-empty"
        );
        assert!(
            self.brick_width > 0.0 && self.brick_height > 0.0,
            "brick dimensions must be positive"
        );
        assert!(self.brick_spacing >= 0.0, "brick spacing must not be negative");
        assert!(
            self.paddle_width > 0.0 && self.paddle_height > 0.0,
            "paddle dimensions must be positive"
        );
        assert!(self.paddle_speed > 0.0, "paddle speed must be positive");
        assert!(self.ball_radius > 0.0, "ball radius must be positive");
        assert!(self.ball_speed > 0.0, "ball speed must be positive");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        FieldConfig::default().validate();
    }

    #[test]
    fn json_round_trip() {
        let config = FieldConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(FieldConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn bad_json_falls_back_to_defaults() {
        let config = FieldConfig::from_json_or_default("not json at all");
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    #[should_panic(expected = "brick grid must be non-empty")]
    fn empty_grid_is_rejected() {
        let config = FieldConfig {
            bricks_x: 0,
            ..FieldConfig::default()
        };
        config.validate();
    }
}
