#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{Wheel, WheelHeading};
#[cfg(feature = "debug")]
use crate::core::config::GameConfig;
#[cfg(feature = "debug")]
use crate::gameplay::target::HiddenTarget;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;

#[cfg(feature = "debug")]
#[derive(Component)]
pub(crate) struct DebugOverlayText;

#[cfg(feature = "debug")]
pub fn debug_overlay_spawn(mut commands: Commands) {
    // Top-left anchored; the HUD owns the other corners.
    commands.spawn((
        Text::new(String::new()),
        TextFont {
            font_size: 14.0,
            ..Default::default()
        },
        TextColor(Color::srgb(0.75, 0.85, 0.95)),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            top: Val::Px(4.0),
            left: Val::Px(6.0),
            ..Default::default()
        },
        DebugOverlayText,
    ));
}

#[cfg(feature = "debug")]
pub fn overlay_line(stats: &DebugStats, state: &DebugState, active: &[&str]) -> String {
    let mut base = format!(
        "FPS {:.1} ft {:.1}ms wheel ({:.1}, {:.1}) heading ({:.2}, {:.2}) dist {:.2} points {} t {}",
        stats.fps,
        stats.frame_time_ms,
        stats.wheel_position.x,
        stats.wheel_position.z,
        stats.heading.x,
        stats.heading.z,
        stats.distance_to_target,
        stats.points_found,
        stats.time_left,
    );
    if state.reveal_target {
        base.push_str(" [target revealed]");
    }
    if !active.is_empty() {
        base.push_str("\nactions: ");
        base.push_str(&active.join(" "));
    }
    base
}

#[cfg(feature = "debug")]
pub(crate) fn debug_overlay_update(
    state: Res<DebugState>,
    stats: Res<DebugStats>,
    input_map: Option<Res<InputMap>>,
    mut q_text: Query<&mut Text, With<DebugOverlayText>>,
) {
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    if !state.overlay_visible {
        if !text.0.is_empty() {
            text.0.clear();
        }
        return;
    }
    let active: Vec<&str> = input_map
        .as_deref()
        .map(|im| im.active_action_names().collect())
        .unwrap_or_default();
    text.0 = overlay_line(&stats, &state, &active);
}

/// Sphere + ground ring at the hidden point, plus a heading arrow on the wheel.
#[cfg(feature = "debug")]
pub(crate) fn debug_target_gizmos(
    state: Res<DebugState>,
    cfg: Res<GameConfig>,
    target: Option<Res<HiddenTarget>>,
    q_wheel: Query<(&Transform, &WheelHeading), With<Wheel>>,
    mut gizmos: Gizmos,
) {
    if !state.reveal_target {
        return;
    }
    if let Some(target) = target {
        let p = target.position;
        gizmos.sphere(Isometry3d::from_translation(p + Vec3::Y * 0.5), 0.5, Color::srgb(1.0, 0.85, 0.1));
        gizmos.circle(
            Isometry3d::new(p + Vec3::Y * 0.01, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
            cfg.target.capture_radius,
            Color::srgb(1.0, 0.5, 0.0),
        );
    }
    if let Ok((t, heading)) = q_wheel.single() {
        gizmos.arrow(t.translation, t.translation + heading.forward * 3.0, Color::srgb(0.2, 0.9, 1.0));
    }
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;

    #[test]
    fn overlay_lists_active_actions() {
        let stats = DebugStats { points_found: 3, time_left: 12, ..Default::default() };
        let state = DebugState { reveal_target: true, ..Default::default() };
        let line = overlay_line(&stats, &state, &["RollForward", "SteerLeft"]);
        assert!(line.contains("points 3 t 12"));
        assert!(line.contains("[target revealed]"));
        assert!(line.ends_with("actions: RollForward SteerLeft"));
    }
}
