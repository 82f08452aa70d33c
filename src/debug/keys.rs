#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::{actions, InputMap};
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_key_input_system(input_map: Option<Res<InputMap>>, mut state: ResMut<DebugState>) {
    let Some(input_map) = input_map else {
        return;
    };
    if input_map.just_pressed(actions::TOGGLE_OVERLAY) {
        state.overlay_visible = !state.overlay_visible;
        info!(target: "debug", "overlay {}", if state.overlay_visible { "shown" } else { "hidden" });
    }
    if input_map.just_pressed(actions::REVEAL_TARGET) {
        state.reveal_target = !state.reveal_target;
        info!(
            target: "debug",
            "REVEAL_TARGET {} frame={}",
            state.reveal_target, state.frame_counter
        );
    }
}
