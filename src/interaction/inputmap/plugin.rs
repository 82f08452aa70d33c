use bevy::prelude::*;

use super::types::InputMap;
use super::parse::{parse_input_toml, DEFAULT_INPUT_TOML};
use super::systems::system_evaluate_bindings;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

pub fn input_config_path() -> String { std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| "assets/config/input.toml".into()) }

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin { fn build(&self, app: &mut App) { app
        .init_resource::<InputMap>()
        .configure_sets(PreUpdate, InputActionUpdateSet.after(bevy::input::InputSystem))
        .add_systems(PreStartup, load_initial_input_map)
        .add_systems(PreUpdate, system_evaluate_bindings.in_set(InputActionUpdateSet)); } }

fn load_initial_input_map(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")] let raw: String = DEFAULT_INPUT_TOML.to_string();
    #[cfg(not(target_arch = "wasm32"))] let raw: String = { let path = input_config_path(); std::fs::read_to_string(&path).unwrap_or_else(|e| { warn!(target: "input", "input map {path} unreadable ({e}); using bundled bindings"); DEFAULT_INPUT_TOML.to_string() }) };
    let parsed = parse_input_toml(&raw, cfg!(feature="debug"));
    if !parsed.errors.is_empty() { for e in &parsed.errors { error!(target: "input", "INPUT MAP ERROR: {e}"); } }
    if parsed.input_map.actions.is_empty() { warn!(target: "input", "input map has no actions; falling back to bundled bindings"); commands.insert_resource(InputMap::with_defaults()); return; }
    info!(target: "input", "Input map loaded: {} actions, {} bindings", parsed.input_map.actions.len(), parsed.input_map.bindings.len());
    commands.insert_resource(parsed.input_map); }
