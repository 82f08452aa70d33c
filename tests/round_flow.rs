use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use wheel_mode::core::components::WheelSpawnPose;
use wheel_mode::core::system::system_order::{
    GameplayInitSet, RoundSet, SceneSetupSet, ScoringSet, WheelMotionSet,
};
use wheel_mode::gameplay::round::RoundPlugin;
use wheel_mode::gameplay::target::TargetPlugin;
use wheel_mode::gameplay::wheel::{initial_heading, wheel_base_rotation, WheelPlugin};
use wheel_mode::interaction::inputmap::plugin::InputActionsPlugin;
use wheel_mode::{FollowCamera, GameConfig, HiddenTarget, RoundClock, RoundState, Score, Wheel};

/// Gameplay plugins without rendering; the wheel is spawned by hand in place of the scene.
fn headless_app(duration: i32) -> (App, Entity) {
    let mut cfg = GameConfig::default();
    cfg.round.duration_secs = duration;
    cfg.target.seed = Some(1234);

    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .init_state::<RoundState>()
        .init_resource::<Time>()
        .insert_resource(ButtonInput::<KeyCode>::default())
        .insert_resource(cfg)
        .configure_sets(Startup, GameplayInitSet.after(SceneSetupSet))
        .configure_sets(
            Update,
            (WheelMotionSet, ScoringSet.after(WheelMotionSet), RoundSet.after(ScoringSet)),
        )
        .add_plugins((InputActionsPlugin, WheelPlugin, TargetPlugin, RoundPlugin));

    let base = wheel_base_rotation();
    let pose = Transform::from_xyz(0.0, 1.0, 0.0).with_rotation(base);
    let wheel = app
        .world_mut()
        .spawn((
            Wheel,
            initial_heading(base),
            pose,
            WheelSpawnPose { transform: pose, heading: initial_heading(base) },
        ))
        .id();
    app.world_mut().spawn((FollowCamera, Transform::from_xyz(0.0, 13.0, 18.0)));
    (app, wheel)
}

fn step(app: &mut App, millis: u64) {
    app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(millis));
    app.update();
}

fn state(app: &App) -> RoundState {
    *app.world().resource::<State<RoundState>>().get()
}

#[test]
fn rolling_forward_changes_distance() {
    let (mut app, _) = headless_app(30);
    step(&mut app, 0);
    let before = app.world().resource::<HiddenTarget>().distance;
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyW);
    step(&mut app, 200);
    let after = app.world().resource::<HiddenTarget>().distance;
    assert_ne!(before, after);
}

#[test]
fn full_round_scores_then_ends() {
    let (mut app, wheel) = headless_app(2);
    step(&mut app, 0);
    assert_eq!(state(&app), RoundState::Playing);

    let target = app.world().resource::<HiddenTarget>().position;
    app.world_mut()
        .get_mut::<Transform>(wheel)
        .expect("wheel")
        .translation = target + Vec3::new(0.5, 1.0, 0.0);
    step(&mut app, 10);
    assert_eq!(app.world().resource::<Score>().points_found, 1);
    assert_ne!(app.world().resource::<HiddenTarget>().position, target);

    step(&mut app, 1000);
    step(&mut app, 1000);
    assert!(app.world().resource::<RoundClock>().is_finished());
    step(&mut app, 10);
    assert_eq!(state(&app), RoundState::GameOver);
    assert_eq!(app.world().resource::<RoundClock>().time_left, 0);

    // Input no longer moves the wheel once the round is over.
    let frozen = app.world().get::<Transform>(wheel).expect("wheel").translation;
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyW);
    step(&mut app, 100);
    assert_eq!(app.world().get::<Transform>(wheel).expect("wheel").translation, frozen);
    assert_eq!(app.world().resource::<Score>().points_found, 1);
}
