//! Hidden target placement, distance tracking and capture scoring.
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::components::Wheel;
use crate::core::config::{GameConfig, TargetConfig};
use crate::core::system::system_order::{GameplayInitSet, ScoringSet};

/// The point the player is hunting. Never rendered outside debug gizmos.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HiddenTarget {
    pub position: Vec3,
    /// Ground-plane distance from the wheel, refreshed every frame.
    pub distance: f32,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points_found: u32,
}

#[derive(Resource, Deref, DerefMut)]
pub struct TargetRng(pub StdRng);

impl TargetRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self(StdRng::seed_from_u64(s)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Distance on the ground plane; wheel height does not count against the player.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

fn random_ground_point<R: Rng>(rng: &mut R, extent: f32) -> Vec3 {
    if extent <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.gen_range(-extent..=extent),
        0.0,
        rng.gen_range(-extent..=extent),
    )
}

/// Uniform point in the spawn square, re-rolled (bounded) while it would be captured on the spot.
pub fn spawn_hidden_point<R: Rng>(rng: &mut R, wheel_pos: Vec3, cfg: &TargetConfig) -> Vec3 {
    let extent = cfg.spawn_extent().unwrap_or_else(|| {
        warn!(target: "target", max_spawn_distance = cfg.max_spawn_distance, "spawn distance out of range; using default");
        TargetConfig::default().max_spawn_distance
    });
    let mut candidate = random_ground_point(rng, extent);
    for _ in 0..cfg.respawn_attempts {
        if planar_distance(candidate, wheel_pos) >= cfg.capture_radius {
            break;
        }
        candidate = random_ground_point(rng, extent);
    }
    candidate
}

impl HiddenTarget {
    pub fn spawn<R: Rng>(rng: &mut R, wheel_pos: Vec3, cfg: &TargetConfig) -> Self {
        let position = spawn_hidden_point(rng, wheel_pos, cfg);
        Self {
            position,
            distance: planar_distance(position, wheel_pos),
        }
    }

    pub fn respawn<R: Rng>(&mut self, rng: &mut R, wheel_pos: Vec3, cfg: &TargetConfig) {
        *self = Self::spawn(rng, wheel_pos, cfg);
        debug!(target: "target", position = ?self.position, distance = self.distance, "hidden target respawned");
    }

    pub fn is_captured(&self, cfg: &TargetConfig) -> bool {
        self.distance < cfg.capture_radius
    }
}

pub struct TargetPlugin;

impl Plugin for TargetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Score>()
            .add_systems(Startup, init_target.in_set(GameplayInitSet))
            .add_systems(
                Update,
                (track_target, capture_target).chain().in_set(ScoringSet),
            );
    }
}

/// Seeds the RNG and places the first target. Runs after the scene so the wheel position is known.
pub fn init_target(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    q_wheel: Query<&Transform, With<Wheel>>,
) {
    let wheel_pos = q_wheel.single().map(|t| t.translation).unwrap_or(Vec3::ZERO);
    let mut rng = TargetRng::new(cfg.target.seed);
    let target = HiddenTarget::spawn(&mut rng.0, wheel_pos, &cfg.target);
    info!(
        target: "target",
        seeded = cfg.target.seed.is_some(),
        "hidden target placed {:.1} units from the wheel",
        target.distance
    );
    commands.insert_resource(rng);
    commands.insert_resource(target);
}

pub fn track_target(
    q_wheel: Query<&Transform, With<Wheel>>,
    mut target: ResMut<HiddenTarget>,
    mut reported_missing: Local<bool>,
) {
    let wheel = match q_wheel.single() {
        Ok(wheel) => wheel,
        Err(e) => {
            if !*reported_missing {
                error!(target: "target", "expected exactly one Wheel ({e}); distance not tracked");
                *reported_missing = true;
            }
            return;
        }
    };
    let d = planar_distance(wheel.translation, target.position);
    if target.distance != d {
        target.distance = d;
    }
}

/// Awards a point and moves the target once the wheel is strictly inside the capture radius.
pub fn capture_target(
    cfg: Res<GameConfig>,
    q_wheel: Query<&Transform, With<Wheel>>,
    mut target: ResMut<HiddenTarget>,
    mut score: ResMut<Score>,
    mut rng: ResMut<TargetRng>,
    mut reported_missing: Local<bool>,
) {
    let wheel = match q_wheel.single() {
        Ok(wheel) => wheel,
        Err(e) => {
            if !*reported_missing {
                error!(target: "target", "expected exactly one Wheel ({e}); capture check skipped");
                *reported_missing = true;
            }
            return;
        }
    };
    if !target.is_captured(&cfg.target) {
        return;
    }
    score.points_found += 1;
    info!(target: "target", points = score.points_found, "hidden point found");
    target.respawn(&mut rng.0, wheel.translation, &cfg.target);
}
