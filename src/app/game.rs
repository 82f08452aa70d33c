use bevy::prelude::*;

use crate::app::state::RoundState;
use crate::core::system::system_order::{
    GameplayInitSet, HudSet, RoundSet, SceneSetupSet, ScoringSet, WheelMotionSet,
};
use crate::debug::DebugPlugin;
use crate::gameplay::round::RoundPlugin;
use crate::gameplay::target::TargetPlugin;
use crate::gameplay::wheel::WheelPlugin;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::hot_reload::InputMapHotReloadPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::scene::ScenePlugin;

/// Everything the game needs on top of `DefaultPlugins`. Expects a `GameConfig` resource.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<RoundState>()
            .configure_sets(Startup, GameplayInitSet.after(SceneSetupSet))
            .configure_sets(
                Update,
                (
                    WheelMotionSet,
                    ScoringSet.after(WheelMotionSet),
                    RoundSet.after(ScoringSet),
                    HudSet.after(RoundSet),
                ),
            )
            .add_plugins((
                InputActionsPlugin,
                ScenePlugin,
                WheelPlugin,
                TargetPlugin,
                RoundPlugin,
                HudPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
                AutoClosePlugin,
                #[cfg(feature = "debug")]
                InputMapHotReloadPlugin,
            ));
    }
}
