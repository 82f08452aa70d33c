use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::{ConfigOverrides, GameConfig};

/// Layers polled for changes. `main` replaces the defaults with the layers it actually loaded.
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings { pub paths: Vec<PathBuf>, pub interval_secs: f32 }
impl Default for ConfigReloadSettings { fn default() -> Self { Self { paths: vec![ PathBuf::from("assets/config/game.ron"), PathBuf::from("assets/config/game.local.ron"), ], interval_secs: 0.5 } } }

#[derive(Resource, Debug)]
struct ConfigReloadState { last_mod: HashMap<PathBuf, SystemTime>, timer: Timer, primed: bool }
impl Default for ConfigReloadState { fn default() -> Self { Self { last_mod: HashMap::new(), timer: Timer::from_seconds(0.5, TimerMode::Repeating), primed: false } } }

pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin { fn build(&self, app: &mut App) { #[cfg(not(target_arch = "wasm32"))] { app.init_resource::<ConfigReloadSettings>().init_resource::<ConfigReloadState>().add_systems(Update, poll_and_reload_config); } } }

/// Returns true when any layer's mtime moved forward since the last poll.
fn layers_dirty(paths: &[PathBuf], last_mod: &mut HashMap<PathBuf, SystemTime>) -> bool {
    let mut dirty = false;
    for path in paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else { continue; };
        let entry = last_mod.entry(path.clone()).or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry { *entry = mod_time; dirty = true; }
    }
    dirty
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    overrides: Option<Res<ConfigOverrides>>,
    mut windows: Query<&mut Window>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON { state.timer.set_duration(std::time::Duration::from_secs_f32(interval)); }
    if !state.timer.tick(time.delta()).finished() { return; }
    let state = &mut *state;
    let dirty = layers_dirty(&settings.paths, &mut state.last_mod);
    // First pass only records timestamps of the files loaded at startup.
    if !state.primed { state.primed = true; return; }
    if !dirty { return; }
    let (mut new_cfg, _used, errors) = GameConfig::load_layered(settings.paths.iter());
    if let Some(overrides) = overrides { overrides.apply(&mut new_cfg); }
    for e in errors { if !e.contains("read error") { warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}"); } }
    if *cfg_res == new_cfg { return; }
    for w in new_cfg.validate() { warn!(target: "config", "config warning: {w}"); }
    info!(target: "config", "Config hot-reload applied");
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height { window.resolution.set(new_cfg.window.width, new_cfg.window.height); }
        if window.title != new_cfg.window.title { window.title = new_cfg.window.title.clone(); }
    }
    *cfg_res = new_cfg;
}
