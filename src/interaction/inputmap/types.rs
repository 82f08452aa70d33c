use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Action names the gameplay systems query. Bindings in `input.toml` refer to these.
pub mod actions {
    pub const STEER_LEFT: &str = "SteerLeft";
    pub const STEER_RIGHT: &str = "SteerRight";
    pub const ROLL_FORWARD: &str = "RollForward";
    pub const ROLL_BACKWARD: &str = "RollBackward";
    pub const RESTART: &str = "Restart";
    pub const TOGGLE_OVERLAY: &str = "ToggleOverlay";
    pub const REVEAL_TARGET: &str = "RevealTarget";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub u16); // internal index (array position)

#[derive(Debug, Clone)]
pub struct ActionMeta { pub id: ActionId, pub name: String, pub description: String }

/// Per-frame action state. `just_*` flags live for exactly one evaluation pass.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState { pub pressed: bool, pub just_pressed: bool, pub just_released: bool }
impl ActionState { pub fn clear_transitions(&mut self) { self.just_pressed = false; self.just_released = false; } }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawBindingToken { Key(KeyCode), MouseBtn(MouseButton) }

#[derive(Debug, Clone)]
pub struct Binding { pub id: u32, pub action: ActionId, pub tokens: SmallVec<[RawBindingToken; 2]>, pub hold_secs: f32 }

#[derive(Debug, Default, Clone)]
pub struct BindingRuntime { pub active: bool, pub hold_elapsed: f32 }
impl BindingRuntime {
    /// Chord held and, when a hold qualifier is present, held long enough.
    pub fn satisfied(&self, hold_secs: f32) -> bool { self.active && !(hold_secs > 0.0 && self.hold_elapsed < hold_secs) }
}

#[derive(Resource, Debug, Default)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings_index: HashMap<ActionId, Vec<u32>>, // mapping to binding ids
    pub bindings: Vec<Binding>,
    pub bindings_runtime: Vec<BindingRuntime>,
    pub states: Vec<ActionState>,
}

impl InputMap {
    pub fn get_state(&self, name: &str) -> Option<&ActionState> { self.name_to_id.get(name).and_then(|id| self.states.get(id.0 as usize)) }
    pub fn pressed(&self, name: &str) -> bool { self.get_state(name).is_some_and(|s| s.pressed) }
    pub fn just_pressed(&self, name: &str) -> bool { self.get_state(name).is_some_and(|s| s.just_pressed) }
    pub fn just_released(&self, name: &str) -> bool { self.get_state(name).is_some_and(|s| s.just_released) }
    pub fn has_action(&self, name: &str) -> bool { self.name_to_id.contains_key(name) }
    pub fn active_action_names(&self) -> impl Iterator<Item = &str> { self.actions.iter().filter(|m| self.states.get(m.id.0 as usize).is_some_and(|s| s.pressed)).map(|m| m.name.as_str()) }
}
