//! Wheel steering and rolling.
//!
//! Steering is a world-space yaw about +Y applied to both the wheel rotation and its heading.
//! Rolling translates along the heading and spins the mesh about its local axle.
use bevy::prelude::*;

use crate::app::state::RoundState;
use crate::core::components::{FollowCamera, Wheel, WheelHeading};
use crate::core::config::{GameConfig, WheelConfig};
use crate::core::system::system_order::WheelMotionSet;
use crate::interaction::inputmap::types::{actions, InputMap};

/// Cylinder meshes are Y-aligned, so the axle is the mesh-local Y axis.
pub const WHEEL_AXLE: Vec3 = Vec3::Y;
/// Mesh-local direction that becomes the initial heading once the base rotation is applied.
pub const WHEEL_LOCAL_FORWARD: Vec3 = Vec3::NEG_Z;

/// Rotation standing the Y-aligned cylinder upright with its axle along world X.
pub fn wheel_base_rotation() -> Quat {
    Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)
}

pub fn initial_heading(base_rotation: Quat) -> WheelHeading {
    WheelHeading {
        forward: (base_rotation * WHEEL_LOCAL_FORWARD)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z),
    }
}

/// Snapshot of the four wheel actions for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WheelCommand {
    pub steer_left: bool,
    pub steer_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl WheelCommand {
    pub fn from_input(map: &InputMap) -> Self {
        Self {
            steer_left: map.pressed(actions::STEER_LEFT),
            steer_right: map.pressed(actions::STEER_RIGHT),
            forward: map.pressed(actions::ROLL_FORWARD),
            backward: map.pressed(actions::ROLL_BACKWARD),
        }
    }

    pub fn is_idle(&self) -> bool {
        !(self.steer_left || self.steer_right || self.forward || self.backward)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelStep {
    pub rotation: Quat,
    pub heading: Vec3,
    pub translation: Vec3,
}

/// One frame of wheel motion. Steering happens first so a simultaneous roll follows the new heading.
pub fn steer_and_roll(
    rotation: Quat,
    heading: Vec3,
    cmd: WheelCommand,
    dt: f32,
    cfg: &WheelConfig,
) -> WheelStep {
    let mut rotation = rotation;
    let mut heading = heading;

    let mut steer_deg = 0.0_f32;
    if cmd.steer_left {
        steer_deg += cfg.steer_speed_deg * dt;
    }
    if cmd.steer_right {
        steer_deg -= cfg.steer_speed_deg * dt;
    }
    if steer_deg != 0.0 {
        let yaw = Quat::from_axis_angle(Vec3::Y, steer_deg.to_radians());
        rotation = yaw * rotation;
        heading = yaw * heading;
    }

    let mut translation = Vec3::ZERO;
    let roll = (cfg.roll_speed_deg * dt).to_radians();
    if cmd.forward {
        translation += heading * cfg.speed * dt;
        rotation *= Quat::from_axis_angle(WHEEL_AXLE, roll);
    }
    if cmd.backward {
        translation -= heading * cfg.speed * dt;
        rotation *= Quat::from_axis_angle(WHEEL_AXLE, -roll);
    }

    WheelStep {
        rotation: rotation.normalize(),
        heading,
        translation,
    }
}

pub struct WheelPlugin;

impl Plugin for WheelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            drive_wheel
                .in_set(WheelMotionSet)
                .run_if(in_state(RoundState::Playing)),
        );
    }
}

/// Applies this frame's wheel step; the follow camera takes the same translation so framing is kept.
pub fn drive_wheel(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    input_map: Res<InputMap>,
    mut q_wheel: Query<(&mut Transform, &mut WheelHeading), (With<Wheel>, Without<FollowCamera>)>,
    mut q_camera: Query<&mut Transform, (With<FollowCamera>, Without<Wheel>)>,
    mut reported_missing: Local<bool>,
    mut reported_camera: Local<bool>,
) {
    let cmd = WheelCommand::from_input(&input_map);
    if cmd.is_idle() {
        return;
    }
    let Ok((mut transform, mut heading)) = q_wheel.single_mut() else {
        if !*reported_missing {
            error!(target: "wheel", "expected exactly one Wheel entity; wheel input ignored");
            *reported_missing = true;
        }
        return;
    };
    let step = steer_and_roll(
        transform.rotation,
        heading.forward,
        cmd,
        time.delta_secs(),
        &cfg.wheel,
    );
    transform.rotation = step.rotation;
    transform.translation += step.translation;
    heading.forward = step.heading;

    if step.translation != Vec3::ZERO {
        match q_camera.single_mut() {
            Ok(mut camera) => camera.translation += step.translation,
            Err(e) => {
                if !*reported_camera {
                    error!(target: "wheel", "expected exactly one FollowCamera ({e}); camera not following");
                    *reported_camera = true;
                }
            }
        }
    }
}
