/// Camera pose, object spin and the per-frame physics step
use std::f64::consts::FRAC_PI_2;

use crate::config::{ControlConfig, PhysicsConfig};
use crate::input::InputEvent;
use crate::transform::Mat4x4;
use crate::vector::Vec3;

/// The free-flying camera
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Rotation about the world Y axis in radians. Positive turns left.
    pub yaw: f64,
    /// Rotation about the camera X axis in radians. Positive looks up.
    pub pitch: f64,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Unit vector the camera looks along.
    ///
    /// This is `Ry(yaw) * Rx(pitch) * (0, 0, -1)`, the inverse of the
    /// rotation part of [`Player::view_matrix`], so thrust always moves the
    /// camera toward the center of the screen.
    pub fn facing(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// World-to-camera transform: undo the translation, then the yaw, then
    /// the pitch
    pub fn view_matrix(&self) -> Mat4x4 {
        let rotation = Mat4x4::rotation_x(-self.pitch) * Mat4x4::rotation_y(-self.yaw);
        let p = self.position;
        rotation * Mat4x4::translation(-p.x, -p.y, -p.z)
    }

    /// Rotate by delta amounts (in radians), clamping pitch short of the poles
    pub fn turn(&mut self, d_yaw: f64, d_pitch: f64, pitch_margin: f64) {
        self.yaw += d_yaw;
        let limit = FRAC_PI_2 - pitch_margin;
        self.pitch = (self.pitch + d_pitch).clamp(-limit, limit);
    }

    /// Accelerate along the facing direction
    pub fn thrust(&mut self, amount: f64) {
        self.velocity = self.velocity + self.facing().scale(amount);
    }

    /// Remove `fraction` of the current velocity
    pub fn brake(&mut self, fraction: f64) {
        self.velocity = self.velocity - self.velocity.scale(fraction);
    }

    fn integrate(&mut self, friction: f64) {
        self.velocity = self.velocity.scale(friction);
        self.position = self.position + self.velocity;
    }
}

/// Whether the render loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Everything that changes from frame to frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    /// Object rotation angle in radians, only ever increases
    pub spin: f64,
    pub player: Player,
}

impl Pose {
    pub fn new(player: Player) -> Self {
        Self { spin: 0.0, player }
    }

    /// Advance one frame: spin the object, decay velocity, move the camera
    pub fn step(&mut self, physics: &PhysicsConfig) {
        self.spin += physics.spin_rate;
        self.player.integrate(physics.friction);
    }

    /// Apply one input event
    pub fn apply(&mut self, event: InputEvent, controls: &ControlConfig) -> Control {
        let player = &mut self.player;
        match event {
            InputEvent::Quit => return Control::Quit,
            InputEvent::Key(key) => match key.to_ascii_lowercase() {
                'a' => player.turn(controls.turn_step, 0.0, controls.pitch_margin),
                'd' => player.turn(-controls.turn_step, 0.0, controls.pitch_margin),
                'r' => player.turn(0.0, controls.turn_step, controls.pitch_margin),
                'f' => player.turn(0.0, -controls.turn_step, controls.pitch_margin),
                'w' => player.thrust(controls.thrust),
                's' => player.brake(controls.brake),
                _ => {}
            },
            InputEvent::MouseDelta { dx, dy } => player.turn(
                -dx * controls.mouse_sensitivity,
                -dy * controls.mouse_sensitivity,
                controls.pitch_margin,
            ),
        }
        Control::Continue
    }
}
