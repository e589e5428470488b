//! Integration tests for configuration loading
//!
//! Tests that verify layered config loading from files and environment variables.

use serial_test::serial;
use spaceship_core::MeshKind;
use spaceship_terminal::config::{AppConfig, ConfigError};
use std::fs;
use std::path::PathBuf;

/// A fresh, empty directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spaceship-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from(scratch_dir("empty")).unwrap();
    assert_eq!(config.render.fov, 90.0);
    assert_eq!(config.scene.mesh, MeshKind::WireCube);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = scratch_dir("layers");
    fs::write(
        dir.join("default.toml"),
        "[render]\nfov = 80.0\nfar = 50.0\n\n[scene]\nmesh = \"cube\"\n",
    )
    .unwrap();
    fs::write(dir.join("user.toml"), "[render]\nfov = 70.0\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.render.fov, 70.0);
    assert_eq!(config.render.far, 50.0);
    assert_eq!(config.render.near, 0.1);
    assert_eq!(config.scene.mesh, MeshKind::Cube);
}

#[test]
#[serial]
fn test_env_override() {
    let dir = scratch_dir("env");
    fs::write(dir.join("default.toml"), "[physics]\nfriction = 0.9\n").unwrap();
    std::env::set_var("SPACESHIP_PHYSICS__FRICTION", "0.5");
    std::env::set_var("SPACESHIP_SCENE__MESH", "octahedron");
    let config = AppConfig::load_from(&dir);
    std::env::remove_var("SPACESHIP_PHYSICS__FRICTION");
    std::env::remove_var("SPACESHIP_SCENE__MESH");

    let config = config.unwrap();
    assert_eq!(config.physics.friction, 0.5);
    assert_eq!(config.scene.mesh, MeshKind::Octahedron);
}

#[test]
#[serial]
fn test_out_of_range_value_is_rejected() {
    let dir = scratch_dir("invalid");
    fs::write(dir.join("default.toml"), "[render]\nnear = 5.0\nfar = 1.0\n").unwrap();
    match AppConfig::load_from(&dir) {
        Err(ConfigError::Invalid(e)) => assert_eq!(e.field, "render.far"),
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_malformed_file_is_a_load_error() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("default.toml"), "[render]\nfov = \"wide\"\n").unwrap();
    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_shipped_default_config_is_valid() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config");
    let config = AppConfig::load_from(dir).unwrap();
    assert_eq!(config.frame.glyph, '#');
    assert_eq!(config.camera.start_position, [0.0, 0.0, 5.0]);
}
