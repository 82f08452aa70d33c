use bevy::prelude::*;

/// Round lifecycle: Playing -> GameOver (clock hit zero) -> Playing (restart).
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum RoundState {
    /// Wheel responds to input; the countdown is running.
    #[default]
    Playing,
    /// Countdown reached zero. Input is ignored until a restart.
    GameOver,
}
