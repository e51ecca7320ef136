//! Loading and saving run configuration on disk

use std::fs;
use wavedrift::config::{ConfigError, SimulationConfig};
use wavedrift::physics::profiles::{InitialProfile, PulseProfile};

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.toml");

    let mut config = SimulationConfig::default();
    config.grid.points = 200;
    config.time.dt = 2.5e-7;
    config.integrator.integrator_type = "heun".to_string();
    config.initial = InitialProfile::Sech2(PulseProfile {
        center: None,
        width: 0.3,
        amplitude: 2.0,
    });
    config.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[initial]"));
    assert!(text.contains("kind = \"sech2\""));
    assert!(text.contains("type = \"heun\""));

    assert_eq!(SimulationConfig::load(&path).unwrap(), config);
}

#[test]
fn test_layered_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[grid]
points = 128

[integrator]
type = "rk4"

[initial]
kind = "gaussian"
width = 0.25
amplitude = 0.5
"#,
    )
    .unwrap();

    let config = SimulationConfig::load_layered(Some(&path)).unwrap();
    let defaults = SimulationConfig::default();

    assert_eq!(config.grid.points, 128);
    assert_eq!(config.grid.length, defaults.grid.length);
    assert_eq!(config.time, defaults.time);
    assert_eq!(config.integrator.integrator_type, "rk4");
    assert_eq!(
        config.initial,
        InitialProfile::Gaussian(PulseProfile {
            center: None,
            width: 0.25,
            amplitude: 0.5,
        })
    );
    config.validate().unwrap();
}

#[test]
fn test_layered_without_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let config = SimulationConfig::load_layered(Some(&missing)).unwrap();
    assert_eq!(config.grid, SimulationConfig::default().grid);
}

#[test]
fn test_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[grid\npoints = ").unwrap();

    assert!(matches!(
        SimulationConfig::load(&path),
        Err(ConfigError::Parse { .. })
    ));
    assert_eq!(
        SimulationConfig::load_or_default(&path),
        SimulationConfig::default()
    );
}

#[test]
fn test_unknown_profile_kind_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[initial]\nkind = \"square\"\n").unwrap();

    assert!(matches!(
        SimulationConfig::load(&path),
        Err(ConfigError::Parse { .. })
    ));
}
