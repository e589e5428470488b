//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SPACESHIP_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use spaceship_core::{
    ControlConfig, InvalidConfig, MeshKind, PhysicsConfig, Player, RenderConfig, Vec3,
};
use std::fmt;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub controls: ControlConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SPACESHIP_RENDER__FOV=60 -> render.fov = 60
        figment = figment.merge(Env::prefixed("SPACESHIP_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.render.validate()?;
        self.physics.validate()?;
        self.controls.validate()?;
        self.frame.validate()?;
        if !(self.scene.size > 0.0 && self.scene.size.is_finite()) {
            return Err(InvalidConfig {
                field: "scene.size",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Render loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target duration of one tick in milliseconds
    pub tick_ms: u64,
    /// Input events buffered between ticks before the listener blocks
    pub input_queue: usize,
    /// Character used to plot lines
    pub glyph: char,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            input_queue: 64,
            glyph: '#',
        }
    }
}

impl FrameConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.tick_ms == 0 {
            return Err(InvalidConfig {
                field: "frame.tick_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.input_queue == 0 {
            return Err(InvalidConfig {
                field: "frame.input_queue",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Starting camera pose
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f64; 3],
    /// Starting yaw in degrees
    pub yaw: f64,
    /// Starting pitch in degrees
    pub pitch: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 5.0],
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn player(&self, controls: &ControlConfig) -> Player {
        let mut player = Player::new(Vec3::from(self.start_position));
        player.turn(self.yaw.to_radians(), self.pitch.to_radians(), controls.pitch_margin);
        player
    }
}

/// Which mesh to show
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub mesh: MeshKind,
    /// Edge length for cubes, vertex distance for the octahedron
    pub size: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mesh: MeshKind::WireCube,
            size: 2.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    pub log_level: String,
    /// Write logs here instead of stderr, which the renderer draws over
    pub log_file: Option<String>,
    /// Show the status line
    pub show_hud: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_file: None,
            show_hud: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    Load(Box<figment::Error>),
    /// A value is out of range
    Invalid(InvalidConfig),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

impl From<InvalidConfig> for ConfigError {
    fn from(e: InvalidConfig) -> Self {
        ConfigError::Invalid(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Configuration error: {}", e),
            ConfigError::Invalid(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e.as_ref()),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}
