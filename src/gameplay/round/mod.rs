//! Round countdown on a fixed one-second tick, game-over transition and restart.
use bevy::prelude::*;

use crate::app::state::RoundState;
use crate::core::components::{FollowCamera, Wheel, WheelHeading, WheelSpawnPose};
use crate::core::config::{GameConfig, RoundConfig};
use crate::core::system::system_order::{GameplayInitSet, RoundSet};
use crate::gameplay::target::{HiddenTarget, Score, TargetRng};
use crate::interaction::inputmap::types::{actions, InputMap};

/// Ticks shorter than this would spin the accumulator loop for no visible gain.
pub const MIN_TICK_SECS: f32 = 0.01;

/// Whole seconds left in the round, driven by a frame-time accumulator.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RoundClock {
    pub time_left: i32,
    pub accumulator: f32,
    pub tick_secs: f32,
    finished: bool,
}

impl RoundClock {
    pub fn new(duration_secs: i32, tick_secs: f32) -> Self {
        Self {
            time_left: duration_secs.max(0),
            accumulator: 0.0,
            tick_secs: tick_secs.max(MIN_TICK_SECS),
            finished: duration_secs <= 0,
        }
    }

    pub fn from_config(cfg: &RoundConfig) -> Self {
        Self::new(cfg.duration_secs, cfg.tick_secs)
    }

    /// Changes the tick length mid-round; the accumulated time carries over.
    pub fn set_tick_secs(&mut self, tick_secs: f32) {
        self.tick_secs = tick_secs.max(MIN_TICK_SECS);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feeds frame time into the accumulator and runs every tick that is strictly overdue.
    /// Returns how many ticks ran (including ticks that were no-ops after the round ended).
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.max(0.0);
        let mut ticks = 0;
        while self.accumulator > self.tick_secs {
            self.fixed_tick();
            self.accumulator -= self.tick_secs;
            ticks += 1;
        }
        ticks
    }

    fn fixed_tick(&mut self) {
        if self.finished {
            return;
        }
        self.time_left -= 1;
        if self.time_left <= 0 {
            self.time_left = 0;
            self.finished = true;
        }
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::from_config(&RoundConfig::default())
    }
}

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_round_clock.in_set(GameplayInitSet))
            .add_systems(OnEnter(RoundState::Playing), log_round_start)
            .add_systems(OnEnter(RoundState::GameOver), log_game_over)
            .add_systems(
                Update,
                (
                    tick_round_clock,
                    restart_round.run_if(in_state(RoundState::GameOver)),
                )
                    .chain()
                    .in_set(RoundSet),
            );
    }
}

fn init_round_clock(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(RoundClock::from_config(&cfg.round));
}

fn log_round_start(cfg: Res<GameConfig>) {
    info!(
        target: "round",
        duration = cfg.round.duration_secs,
        "round started: find the hidden point with WSAD"
    );
}

fn log_game_over(score: Res<Score>) {
    info!(target: "round", score = score.points_found, "game over");
}

/// Advances the clock every frame; the countdown itself stops once the round is finished.
pub fn tick_round_clock(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut clock: ResMut<RoundClock>,
    state: Res<State<RoundState>>,
    mut next: ResMut<NextState<RoundState>>,
) {
    if cfg.is_changed() && clock.tick_secs != cfg.round.tick_secs.max(MIN_TICK_SECS) {
        clock.set_tick_secs(cfg.round.tick_secs);
    }
    clock.advance(time.delta_secs());
    if clock.is_finished() && *state.get() == RoundState::Playing {
        next.set(RoundState::GameOver);
    }
}

/// Resets clock, score, wheel pose, camera and target, then resumes play.
#[allow(clippy::too_many_arguments)]
pub fn restart_round(
    input_map: Res<InputMap>,
    cfg: Res<GameConfig>,
    mut clock: ResMut<RoundClock>,
    mut score: ResMut<Score>,
    mut target: ResMut<HiddenTarget>,
    mut rng: ResMut<TargetRng>,
    mut q_wheel: Query<(&mut Transform, &mut WheelHeading, &WheelSpawnPose), (With<Wheel>, Without<FollowCamera>)>,
    mut q_camera: Query<&mut Transform, (With<FollowCamera>, Without<Wheel>)>,
    mut next: ResMut<NextState<RoundState>>,
) {
    if !input_map.just_pressed(actions::RESTART) {
        return;
    }
    *clock = RoundClock::from_config(&cfg.round);
    *score = Score::default();

    let mut wheel_pos = Vec3::ZERO;
    if let Ok((mut transform, mut heading, pose)) = q_wheel.single_mut() {
        *transform = pose.transform;
        *heading = pose.heading;
        wheel_pos = pose.transform.translation;
        if let Ok(mut camera) = q_camera.single_mut() {
            *camera = Transform::from_translation(wheel_pos + cfg.camera.offset.to_vec3())
                .looking_at(wheel_pos, Vec3::Y);
        }
    } else {
        warn!(target: "round", "restart without a wheel; only clock and score reset");
    }
    target.respawn(&mut rng.0, wheel_pos, &cfg.target);
    next.set(RoundState::Playing);
}
