use bevy::prelude::*;

/// Marker component identifying the player wheel (exactly one per scene).
#[derive(Component, Debug, Default)]
pub struct Wheel;

/// Direction the wheel travels when rolled forward, kept in world space.
/// Steering rotates it together with the wheel; rolling leaves it untouched.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct WheelHeading {
    pub forward: Vec3,
}

/// Pose captured at spawn so a restarted round puts the wheel back where it began.
#[derive(Component, Debug, Copy, Clone)]
pub struct WheelSpawnPose {
    pub transform: Transform,
    pub heading: WheelHeading,
}

/// Marker for the single 3D camera that trails the wheel.
#[derive(Component, Debug, Default)]
pub struct FollowCamera;

/// Marker for the ground plane mesh.
#[derive(Component, Debug, Default)]
pub struct Ground;
