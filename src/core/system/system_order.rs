//! Central system ordering labels to make the per-frame gameplay sequence explicit.
//! Stages (high-level):
//! 1. Input (PreUpdate, `InputActionUpdateSet`)
//! 2. WheelMotion (steer/roll the wheel, drag the camera along)
//! 3. Scoring (distance + capture against the moved wheel)
//! 4. Round (fixed-tick countdown, state transitions)
//! 5. Hud (text refresh, implicit rendering afterwards)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct WheelMotionSet; // transform edits driven by input

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ScoringSet; // reads the post-motion wheel position

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RoundSet; // countdown + restart

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct HudSet; // UI text reflects the final state of the frame

/// Startup: the scene (wheel, camera) exists once this set has run.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SceneSetupSet;

/// Startup: gameplay resources that depend on the spawned scene (target, clock).
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct GameplayInitSet;
