//! Systems for input action evaluation.
use bevy::prelude::*;
use super::types::*;

fn token_active(token: &RawBindingToken, keyboard: &ButtonInput<KeyCode>, mouse: Option<&ButtonInput<MouseButton>>) -> bool {
    match token { RawBindingToken::Key(k) => keyboard.pressed(*k), RawBindingToken::MouseBtn(b) => mouse.is_some_and(|m| m.pressed(*b)) }
}

pub fn system_evaluate_bindings(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut input_map: ResMut<InputMap>,
) {
    let dt = time.delta_secs();
    let map = &mut *input_map;
    for st in &mut map.states { st.clear_transitions(); }
    if map.bindings_runtime.len() < map.bindings.len() { map.bindings_runtime.resize(map.bindings.len(), BindingRuntime::default()); }
    let mouse = mouse_buttons.as_deref();
    // Chord runtime: all tokens held -> active; hold timer restarts on every fresh press.
    for binding in &map.bindings {
        let all_active = binding.tokens.iter().all(|t| token_active(t, &keyboard, mouse));
        let rt = &mut map.bindings_runtime[binding.id as usize];
        if all_active { if rt.active { rt.hold_elapsed += dt; } else { rt.active = true; rt.hold_elapsed = 0.0; } } else { rt.active = false; rt.hold_elapsed = 0.0; }
    }
    // Fold bindings into action state; an action is pressed while any of its bindings is satisfied.
    for (idx, state) in map.states.iter_mut().enumerate() {
        let aid = ActionId(idx as u16);
        let now_pressed = map.bindings_index.get(&aid).is_some_and(|bids| bids.iter().any(|&bid| map.bindings_runtime[bid as usize].satisfied(map.bindings[bid as usize].hold_secs)));
        if now_pressed && !state.pressed { state.just_pressed = true; }
        if !now_pressed && state.pressed { state.just_released = true; }
        state.pressed = now_pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::inputmap::parse::parse_input_toml;
    use std::time::Duration;

    fn app_with(raw: &str) -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.insert_resource(parse_input_toml(raw, false).input_map);
        app.add_systems(Update, system_evaluate_bindings);
        app
    }

    const RAW: &str = r#"
        [actions]
        RollForward = {}
        Restart = {}
        [bindings]
        RollForward = ["Key:W", "Key:ArrowUp"]
        Restart = ["hold>0.5:Key:R"]
    "#;

    #[test]
    fn press_and_release_transitions_last_one_frame() {
        let mut app = app_with(RAW);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyW);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(map.pressed("RollForward") && map.just_pressed("RollForward"));

        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(map.pressed("RollForward") && !map.just_pressed("RollForward"));

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyW);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(!map.pressed("RollForward") && map.just_released("RollForward"));
    }

    #[test]
    fn either_binding_keeps_action_pressed() {
        let mut app = app_with(RAW);
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::KeyW);
            keys.press(KeyCode::ArrowUp);
        }
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyW);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(map.pressed("RollForward"));
        assert!(!map.just_released("RollForward"));
    }

    #[test]
    fn hold_binding_waits_for_threshold() {
        let mut app = app_with(RAW);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyR);
        app.update();
        assert!(!app.world().resource::<InputMap>().pressed("Restart"));
        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(300));
        app.update();
        assert!(!app.world().resource::<InputMap>().pressed("Restart"));
        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(300));
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(map.pressed("Restart") && map.just_pressed("Restart"));
    }

    #[test]
    fn unknown_action_queries_are_false() {
        let mut app = app_with(RAW);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(!map.pressed("Nope"));
        assert!(!map.just_pressed("Nope"));
    }
}
