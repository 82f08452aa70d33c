//! Procedural stand-in for the wheel scene: ground plane, upright wheel, trailing camera, sun.
use bevy::prelude::*;

use crate::core::components::{FollowCamera, Ground, Wheel, WheelSpawnPose};
use crate::core::config::GameConfig;
use crate::core::system::system_order::SceneSetupSet;
use crate::gameplay::wheel::{initial_heading, wheel_base_rotation};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene.in_set(SceneSetupSet))
            .add_systems(Update, sync_clear_color);
    }
}

/// Pure transform for the follow camera: `offset` above/behind `focus`, looking at it.
pub fn follow_camera_transform(focus: Vec3, offset: Vec3) -> Transform {
    Transform::from_translation(focus + offset).looking_at(focus, Vec3::Y)
}

/// Orientation for a directional light shining along `direction` (falls back to straight down).
pub fn light_transform(direction: Vec3) -> Transform {
    let dir = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
    // looking_to needs an up vector that is not parallel to the view direction.
    let up = if dir.cross(Vec3::Z).length_squared() < 1e-6 { Vec3::Y } else { Vec3::Z };
    Transform::default().looking_to(dir, up)
}

pub fn setup_scene(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let scene = &cfg.scene;
    commands.insert_resource(ClearColor(scene.clear_color.to_color()));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(scene.ground_size, scene.ground_size))),
        MeshMaterial3d(materials.add(scene.ground_color.to_color())),
        Transform::default(),
        Ground,
    ));

    let base = wheel_base_rotation();
    let wheel_transform = Transform::from_xyz(0.0, cfg.wheel.radius, 0.0).with_rotation(base);
    let heading = initial_heading(base);
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(cfg.wheel.radius, cfg.wheel.thickness))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: cfg.wheel.color.to_color(),
            perceptual_roughness: 0.6,
            ..default()
        })),
        wheel_transform,
        heading,
        WheelSpawnPose { transform: wheel_transform, heading },
        Wheel,
    ));

    commands.spawn((
        Camera3d::default(),
        follow_camera_transform(wheel_transform.translation, cfg.camera.offset.to_vec3()),
        FollowCamera,
    ));

    commands.spawn((
        DirectionalLight {
            color: scene.light_color.to_color(),
            illuminance: scene.light_illuminance,
            shadows_enabled: true,
            ..default()
        },
        light_transform(scene.light_direction.to_vec3()),
    ));
    info!(target: "scene", "wheel scene ready (ground {}x{})", scene.ground_size, scene.ground_size);
}

/// Keeps the clear colour in step with hot-reloaded config.
fn sync_clear_color(cfg: Res<GameConfig>, mut clear: ResMut<ClearColor>) {
    if !cfg.is_changed() {
        return;
    }
    let want = cfg.scene.clear_color.to_color();
    if clear.0 != want {
        clear.0 = want;
    }
}
