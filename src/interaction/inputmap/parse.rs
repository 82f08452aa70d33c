use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Bundled bindings; also the fallback when no input file can be read.
pub const DEFAULT_INPUT_TOML: &str = include_str!("../../../assets/config/input.toml");

#[derive(Debug, Default)]
pub struct ParsedInputConfig { pub input_map: InputMap, pub errors: Vec<String> }

#[derive(Debug, serde::Deserialize)]
struct ActionDecl { description: Option<String> }

#[derive(Debug, serde::Deserialize)]
struct DebugSection { bindings: Option<BTreeMap<String, Vec<String>>> }

#[derive(Debug, serde::Deserialize)]
struct RootToml { actions: Option<BTreeMap<String, ActionDecl>>, bindings: Option<BTreeMap<String, Vec<String>>>, debug: Option<DebugSection> }

pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) { Ok(r) => r, Err(e) => { result.errors.push(format!("Top-level parse: {e}")); return result; } };
    let mut actions: Vec<ActionMeta> = Vec::new();
    let mut name_to_id = HashMap::new();
    if let Some(map) = root.actions { for (name, decl) in map { if !validate_action_name(&name) { result.errors.push(format!("Invalid action name '{}': must be PascalCase", name)); continue; } let id = ActionId(actions.len() as u16); actions.push(ActionMeta { id, name: name.clone(), description: decl.description.unwrap_or_default() }); name_to_id.insert(name, id); } }

    let states = vec![ActionState::default(); actions.len()];
    let mut input_map = InputMap { actions, name_to_id, states, ..Default::default() };

    // Merge bindings (normal + debug overlay if allowed)
    let mut all_bindings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(b) = root.bindings { for (k, v) in b { all_bindings.entry(k).or_default().extend(v); } }
    if debug_layer { if let Some(db) = root.debug.and_then(|d| d.bindings) { for (k, v) in db { all_bindings.entry(k).or_default().extend(v); } } }

    let mut seen_chords: HashMap<SmallVec<[RawBindingToken; 2]>, String> = HashMap::new();
    for (action_name, list) in all_bindings { let Some(aid) = input_map.name_to_id.get(&action_name).copied() else { result.errors.push(format!("Binding references unknown action '{}'", action_name)); continue; }; for chord_src in &list { match parse_binding(chord_src) { Ok((mut tokens, hold)) => { canonical_sort_tokens(&mut tokens); if let Some(owner) = seen_chords.get(&tokens) { if hold == 0.0 { result.errors.push(format!("[binding {} '{}'] chord already bound to '{}'", action_name, chord_src, owner)); continue; } } seen_chords.insert(tokens.clone(), action_name.clone()); let binding_id = input_map.bindings.len() as u32; input_map.bindings_index.entry(aid).or_default().push(binding_id); input_map.bindings.push(Binding { id: binding_id, action: aid, tokens, hold_secs: hold }); }, Err(err) => { result.errors.push(format!("[binding {} '{}'] {err}", action_name, chord_src)); } } } }
    input_map.bindings_runtime = vec![BindingRuntime::default(); input_map.bindings.len()];
    result.input_map = input_map; result
}

impl InputMap {
    /// Map built from the bundled `input.toml`, debug layer included when the `debug` feature is on.
    pub fn with_defaults() -> Self { let parsed = parse_input_toml(DEFAULT_INPUT_TOML, cfg!(feature = "debug")); for e in &parsed.errors { warn!(target: "input", "bundled input map issue: {e}"); } parsed.input_map }
}

fn validate_action_name(name: &str) -> bool { let bytes = name.as_bytes(); if bytes.is_empty() { return false; } if !bytes[0].is_ascii_uppercase() { return false; } !name.chars().any(|c| !c.is_ascii_alphanumeric()) }

fn canonical_sort_tokens(tokens: &mut SmallVec<[RawBindingToken; 2]>) { tokens.sort_by_key(token_sort_key); }

fn token_sort_key(t: &RawBindingToken) -> (u8, String) { match t { RawBindingToken::Key(k) => (0, format!("{k:?}")), RawBindingToken::MouseBtn(b) => (1, format!("{b:?}")) } }

fn parse_binding(chord_src: &str) -> Result<(SmallVec<[RawBindingToken; 2]>, f32), String> { let mut tokens: SmallVec<[RawBindingToken; 2]> = SmallVec::new(); let mut hold: f32 = 0.0; let mut seen: HashSet<RawBindingToken> = HashSet::new(); for part in chord_src.split('+') { let p = part.trim(); if p.is_empty() { continue; } let token_src = if let Some(rest) = p.strip_prefix("hold>") { let (secs_str, after) = rest.split_once(':').ok_or_else(|| format!("Malformed hold qualifier '{}': missing ':'", p))?; hold = secs_str.parse::<f32>().map_err(|_| format!("Invalid hold seconds '{}'", secs_str))?; if hold < 0.0 { return Err(format!("Negative hold seconds '{}'", secs_str)); } after } else { p }; let token = parse_token(token_src)?; if !seen.insert(token) { return Err(format!("Duplicate token in chord: {:?}", token)); } tokens.push(token); }
 if tokens.is_empty() { return Err("Empty binding".into()); }
 Ok((tokens, hold)) }

fn parse_token(s: &str) -> Result<RawBindingToken, String> { if let Some(rest) = s.strip_prefix("Key:") { return parse_keycode(rest); } if let Some(rest) = s.strip_prefix("Mouse:") { return match rest { "Left" => Ok(RawBindingToken::MouseBtn(MouseButton::Left)), "Right" => Ok(RawBindingToken::MouseBtn(MouseButton::Right)), "Middle" => Ok(RawBindingToken::MouseBtn(MouseButton::Middle)), other => Err(format!("Unknown mouse button '{}'", other)), }; } Err(format!("Unrecognized token '{}'", s)) }

fn parse_keycode(name: &str) -> Result<RawBindingToken, String> {
    let kc = match name {
        "A" | "KeyA" => KeyCode::KeyA, "D" | "KeyD" => KeyCode::KeyD, "E" | "KeyE" => KeyCode::KeyE, "Q" | "KeyQ" => KeyCode::KeyQ,
        "R" | "KeyR" => KeyCode::KeyR, "S" | "KeyS" => KeyCode::KeyS, "W" | "KeyW" => KeyCode::KeyW,
        "ArrowUp" => KeyCode::ArrowUp, "ArrowDown" => KeyCode::ArrowDown, "ArrowLeft" => KeyCode::ArrowLeft, "ArrowRight" => KeyCode::ArrowRight,
        "Space" => KeyCode::Space, "Enter" => KeyCode::Enter, "Escape" => KeyCode::Escape,
        "ShiftLeft" => KeyCode::ShiftLeft, "ControlLeft" => KeyCode::ControlLeft,
        "Digit1" => KeyCode::Digit1, "Digit2" => KeyCode::Digit2, "Digit3" => KeyCode::Digit3, "Digit4" => KeyCode::Digit4,
        "F1" => KeyCode::F1, "F2" => KeyCode::F2, "F3" => KeyCode::F3, "F4" => KeyCode::F4,
        other => return Err(format!("Unsupported KeyCode '{}' (extend parser)", other)),
    };
    Ok(RawBindingToken::Key(kc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_map_has_wheel_actions() {
        let parsed = parse_input_toml(DEFAULT_INPUT_TOML, true);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        for name in [actions::STEER_LEFT, actions::STEER_RIGHT, actions::ROLL_FORWARD, actions::ROLL_BACKWARD, actions::RESTART, actions::TOGGLE_OVERLAY, actions::REVEAL_TARGET] {
            assert!(parsed.input_map.has_action(name), "missing action {name}");
        }
        assert_eq!(parsed.input_map.bindings_runtime.len(), parsed.input_map.bindings.len());
    }

    #[test]
    fn debug_layer_only_merged_when_requested() {
        let raw = r#"
            [actions]
            ToggleOverlay = { description = "overlay" }
            [bindings]
            [debug.bindings]
            ToggleOverlay = ["Key:F1"]
        "#;
        let without = parse_input_toml(raw, false);
        assert!(without.input_map.bindings.is_empty());
        let with = parse_input_toml(raw, true);
        assert_eq!(with.input_map.bindings.len(), 1);
    }

    #[test]
    fn reports_bad_names_tokens_and_duplicates() {
        let raw = r#"
            [actions]
            lowercase = {}
            Go = {}
            Stop = {}
            [bindings]
            Go = ["Key:W", "Key:Nope", "Key:W+Key:W", "hold>x:Key:R"]
            Stop = ["Key:W"]
            Missing = ["Key:S"]
        "#;
        let parsed = parse_input_toml(raw, false);
        let joined = parsed.errors.join("\n");
        assert!(joined.contains("Invalid action name 'lowercase'"));
        assert!(joined.contains("Unsupported KeyCode 'Nope'"));
        assert!(joined.contains("Duplicate token"));
        assert!(joined.contains("Invalid hold seconds"));
        assert!(joined.contains("already bound"));
        assert!(joined.contains("unknown action 'Missing'"));
        assert_eq!(parsed.input_map.bindings.len(), 1);
    }

    #[test]
    fn chord_tokens_are_order_independent() {
        let (mut a, _) = parse_binding("Key:ShiftLeft+Key:W").expect("chord a");
        let (mut b, _) = parse_binding("Key:W+Key:ShiftLeft").expect("chord b");
        canonical_sort_tokens(&mut a);
        canonical_sort_tokens(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn hold_qualifier_parsed() {
        let (tokens, hold) = parse_binding("hold>0.5:Key:R").expect("hold binding");
        assert_eq!(hold, 0.5);
        assert_eq!(tokens.as_slice(), &[RawBindingToken::Key(KeyCode::KeyR)]);
    }

    #[test]
    fn malformed_toml_is_an_error_not_a_panic() {
        let parsed = parse_input_toml("[actions", false);
        assert!(parsed.errors[0].starts_with("Top-level parse"));
        assert!(parsed.input_map.actions.is_empty());
    }
}
