#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(target: "debug", "SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} wheel=({:.1},{:.1}) dist={:.1} points={} time_left={}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.wheel_position.x,
            stats.wheel_position.z,
            stats.distance_to_target,
            stats.points_found,
            stats.time_left);
    }
}
