use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use wheel_mode::interaction::session::config_hot_reload::ConfigReloadSettings;
use wheel_mode::core::config::ConfigOverrides;
use wheel_mode::{GameConfig, GamePlugin};

const BASE_CONFIG: &str = "assets/config/game.ron";
const LOCAL_CONFIG: &str = "assets/config/game.local.ron";

#[derive(Parser, Debug)]
#[command(author, version, about = "Roll a wheel around and hunt hidden points before the clock runs out", long_about = None)]
struct Cli {
    /// RON config layers, later ones win. Defaults to the bundled game.ron plus game.local.ron.
    #[arg(long = "config", num_args = 1..)]
    config: Vec<PathBuf>,
    /// Fixed RNG seed for hidden target placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Round length in seconds.
    #[arg(long)]
    duration: Option<i32>,
    /// Exit automatically after this many seconds.
    #[arg(long)]
    auto_close: Option<f32>,
}

/// Config loading happens before the log plugin exists, so the outcome is replayed at startup.
#[derive(Resource, Debug, Default)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[cfg(target_arch = "wasm32")]
fn load_config(_paths: &[PathBuf]) -> (GameConfig, ConfigLoadReport) {
    const RAW: &str = include_str!("../assets/config/game.ron");
    match ron::from_str(RAW) {
        Ok(cfg) => (cfg, ConfigLoadReport { used: vec![BASE_CONFIG.into()], ..default() }),
        Err(e) => (
            GameConfig::default(),
            ConfigLoadReport { errors: vec![format!("embedded config: {e}")], ..default() },
        ),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(paths: &[PathBuf]) -> (GameConfig, ConfigLoadReport) {
    let (cfg, used, errors) = GameConfig::load_layered(paths);
    (cfg, ConfigLoadReport { used, errors, ..default() })
}

fn log_config_report(report: Res<ConfigLoadReport>, cfg: Res<GameConfig>) {
    for e in &report.errors {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    if report.used.is_empty() {
        info!(target: "config", "No config layers found; using defaults");
    } else {
        info!(target: "config", used = ?report.used, "Config layers loaded");
    }
    for w in &report.warnings {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
    info!(
        target: "config",
        duration = cfg.round.duration_secs,
        capture_radius = cfg.target.capture_radius,
        seeded = cfg.target.seed.is_some(),
        "Round settings"
    );
}

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
    }

    let cli = Cli::parse();
    let paths = if cli.config.is_empty() {
        vec![PathBuf::from(BASE_CONFIG), PathBuf::from(LOCAL_CONFIG)]
    } else {
        cli.config.clone()
    };

    let overrides = ConfigOverrides {
        seed: cli.seed,
        duration_secs: cli.duration,
        auto_close: cli.auto_close,
    };
    let (mut cfg, mut report) = load_config(&paths);
    overrides.apply(&mut cfg);
    report.warnings = cfg.validate();

    let window = Window {
        title: cfg.window.title.clone(),
        resolution: (cfg.window.width, cfg.window.height).into(),
        resizable: true,
        ..default()
    };

    let exit = App::new()
        .insert_resource(cfg)
        .insert_resource(report)
        .insert_resource(overrides)
        .insert_resource(ConfigReloadSettings { paths, ..default() })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .add_systems(PreStartup, log_config_report)
        .run();

    if let AppExit::Error(code) = exit {
        anyhow::bail!("app exited with error code {code}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_takes_several_layers_after_one_flag() {
        let cli = Cli::try_parse_from(["wheel_mode", "--config", "a.ron", "b.ron", "--seed", "3"])
            .expect("parse args");
        assert_eq!(cli.config, vec![PathBuf::from("a.ron"), PathBuf::from("b.ron")]);
        assert_eq!(cli.seed, Some(3));
        assert!(Cli::try_parse_from(["wheel_mode"]).expect("no args").config.is_empty());
    }
}
