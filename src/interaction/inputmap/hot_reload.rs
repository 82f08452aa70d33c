#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use std::{time::SystemTime, path::PathBuf};
#[cfg(feature = "debug")]
use crate::interaction::inputmap::parse::parse_input_toml;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::plugin::input_config_path;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
struct InputReloadState { last_modified: Option<SystemTime>, timer: Timer, path: PathBuf }
#[cfg(feature = "debug")]
impl FromWorld for InputReloadState { fn from_world(_: &mut World) -> Self { Self { last_modified: None, timer: Timer::from_seconds(0.5, TimerMode::Repeating), path: PathBuf::from(input_config_path()) } } }

#[cfg(feature = "debug")]
pub struct InputMapHotReloadPlugin;
#[cfg(feature = "debug")]
impl Plugin for InputMapHotReloadPlugin { fn build(&self, app: &mut App) { #[cfg(not(target_arch = "wasm32"))] app.init_resource::<InputReloadState>().add_systems(Update, poll_input_map_reload); } }

/// Swaps in a freshly parsed map only when it parses cleanly; held keys re-trigger on the next frame.
#[cfg(feature = "debug")]
fn poll_input_map_reload(time: Res<Time>, mut state: ResMut<InputReloadState>, mut input_map: ResMut<InputMap>) {
    if !state.timer.tick(time.delta()).finished() { return; }
    let Ok(mod_time) = std::fs::metadata(&state.path).and_then(|m| m.modified()) else { return; };
    // First observation only records the timestamp; the startup load already used this file.
    let Some(prev) = state.last_modified.replace(mod_time) else { return; };
    if mod_time <= prev { return; }
    let Ok(raw) = std::fs::read_to_string(&state.path) else { return; };
    let parsed = parse_input_toml(&raw, true);
    if !parsed.errors.is_empty() { for e in parsed.errors { warn!(target: "input", "INPUT HOT-RELOAD parse error: {e}"); } return; }
    *input_map = parsed.input_map;
    info!(target: "input", "Input map hot-reloaded");
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;
    use std::time::Duration;

    const GOOD: &str = "[actions]\nRollForward = {}\n[bindings]\nRollForward = [\"Key:W\"]\n";

    fn touch(path: &PathBuf, secs_ahead: u64) {
        let later = SystemTime::now() + Duration::from_secs(secs_ahead);
        std::fs::File::options().write(true).open(path).and_then(|f| f.set_modified(later)).expect("touch");
    }

    fn step(app: &mut App) {
        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(150));
        app.update();
    }

    #[test]
    fn only_clean_edits_replace_the_map() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.toml");
        std::fs::write(&path, GOOD).expect("write input");

        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<InputMap>();
        app.insert_resource(InputReloadState {
            last_modified: None,
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
            path: path.clone(),
        });
        app.add_systems(Update, poll_input_map_reload);

        // First observation only records the timestamp.
        step(&mut app);
        assert!(!app.world().resource::<InputMap>().has_action("RollForward"));

        std::fs::write(&path, "[actions\nRollForward = {}").expect("write broken");
        touch(&path, 5);
        step(&mut app);
        assert!(!app.world().resource::<InputMap>().has_action("RollForward"));

        std::fs::write(&path, GOOD).expect("rewrite input");
        touch(&path, 10);
        step(&mut app);
        let map = app.world().resource::<InputMap>();
        assert!(map.has_action("RollForward"));
        assert_eq!(map.bindings.len(), 1);
    }
}
