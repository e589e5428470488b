//! Tunable parameters for the pipeline, physics step and input effects
//!
//! These are plain immutable records passed into the functions that need
//! them. Defaults reproduce the classic feel: 90° field of view, 1% friction
//! per frame and half-height terminal cells.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A configuration value outside its allowed range
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidConfig {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidConfig {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidConfig {}

/// Projection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Field of view in degrees
    pub fov: f64,
    /// Near clipping plane
    pub near: f64,
    /// Far clipping plane
    pub far: f64,
    /// Vertices with a smaller homogeneous `w` discard their primitive
    pub near_epsilon: f64,
    /// Width / height of a single character cell
    pub cell_aspect: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: 90.0,
            near: 0.1,
            far: 100.0,
            near_epsilon: 0.1,
            cell_aspect: 0.5,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(InvalidConfig::new("render.fov", "must be between 0 and 180 degrees"));
        }
        if !(self.near > 0.0) {
            return Err(InvalidConfig::new("render.near", "must be positive"));
        }
        if !(self.near < self.far) {
            return Err(InvalidConfig::new("render.far", "must be greater than render.near"));
        }
        if !(self.near_epsilon > 0.0) {
            return Err(InvalidConfig::new("render.near_epsilon", "must be positive"));
        }
        if !(self.cell_aspect > 0.0) {
            return Err(InvalidConfig::new("render.cell_aspect", "must be positive"));
        }
        Ok(())
    }
}

/// Per-frame integration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity multiplier applied every frame
    pub friction: f64,
    /// Object spin added every frame, in radians
    pub spin_rate: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.99,
            spin_rate: 0.01,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(0.0..1.0).contains(&self.friction) {
            return Err(InvalidConfig::new("physics.friction", "must be in [0, 1)"));
        }
        if !self.spin_rate.is_finite() {
            return Err(InvalidConfig::new("physics.spin_rate", "must be finite"));
        }
        Ok(())
    }
}

/// Strength of each input effect
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Velocity added along the facing direction per thrust key press
    pub thrust: f64,
    /// Fraction of velocity removed per brake key press
    pub brake: f64,
    /// Yaw/pitch change per turn key press, in radians
    pub turn_step: f64,
    /// Radians of rotation per cell of mouse movement
    pub mouse_sensitivity: f64,
    /// Keeps pitch this far (radians) from straight up or down
    pub pitch_margin: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            thrust: 0.005,
            brake: 0.05,
            turn_step: 0.03,
            mouse_sensitivity: 0.01,
            pitch_margin: 0.01,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(0.0..=1.0).contains(&self.brake) {
            return Err(InvalidConfig::new("controls.brake", "must be in [0, 1]"));
        }
        if !(self.pitch_margin > 0.0 && self.pitch_margin < std::f64::consts::FRAC_PI_2) {
            return Err(InvalidConfig::new("controls.pitch_margin", "must be in (0, pi/2)"));
        }
        if !(self.thrust.is_finite() && self.turn_step.is_finite() && self.mouse_sensitivity.is_finite()) {
            return Err(InvalidConfig::new("controls", "values must be finite"));
        }
        Ok(())
    }
}
