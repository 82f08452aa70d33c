use std::fs;

use wheel_mode::core::config::GameConfig;

#[test]
fn local_layer_overrides_only_what_it_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    fs::write(
        &base,
        r#"(
            window: (width: 800.0, height: 600.0, title: "Base", autoClose: 0.0),
            wheel: (speed: 6.0, steer_speed_deg: 45.0),
            target: (max_spawn_distance: 15.0, capture_radius: 2.0),
        )"#,
    )
    .expect("write base");
    fs::write(&local, "(wheel: (speed: 12.0), target: (seed: Some(77)))").expect("write local");

    let (cfg, used, errors) = GameConfig::load_layered([&base, &local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.window.title, "Base");
    assert_eq!(cfg.wheel.speed, 12.0);
    assert_eq!(cfg.wheel.steer_speed_deg, 45.0);
    assert_eq!(cfg.target.capture_radius, 2.0);
    assert_eq!(cfg.target.seed, Some(77));
}

#[test]
fn missing_and_broken_layers_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("game.ron");
    let broken = dir.path().join("broken.ron");
    let missing = dir.path().join("nope.ron");
    fs::write(&base, "(round: (duration_secs: 12))").expect("write base");
    fs::write(&broken, "(round: (duration_secs: ").expect("write broken");

    let (cfg, used, errors) = GameConfig::load_layered([&base, &broken, &missing]);
    assert_eq!(used.len(), 1);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.contains("parse error")));
    assert!(errors.iter().any(|e| e.contains("read error")));
    assert_eq!(cfg.round.duration_secs, 12);
}

#[test]
fn bundled_config_loads_cleanly() {
    let cfg = GameConfig::load_from_file("assets/config/game.ron").expect("bundled game.ron");
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    assert_eq!(cfg, GameConfig::default());
}
