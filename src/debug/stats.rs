#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{Wheel, WheelHeading};
#[cfg(feature = "debug")]
use crate::gameplay::round::RoundClock;
#[cfg(feature = "debug")]
use crate::gameplay::target::{HiddenTarget, Score};
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_wheel: Query<(&Transform, &WheelHeading), With<Wheel>>,
    target: Option<Res<HiddenTarget>>,
    score: Option<Res<Score>>,
    clock: Option<Res<RoundClock>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    if let Ok((t, heading)) = q_wheel.single() {
        stats.wheel_position = t.translation;
        stats.heading = heading.forward;
    }
    if let Some(target) = target {
        stats.distance_to_target = target.distance;
    }
    if let Some(score) = score {
        stats.points_found = score.points_found;
    }
    if let Some(clock) = clock {
        stats.time_left = clock.time_left;
    }
}
