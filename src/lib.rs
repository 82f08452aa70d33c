pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use app::state::RoundState;
pub use core::components::{FollowCamera, Wheel, WheelHeading};
pub use core::config::{GameConfig, WindowConfig};
pub use gameplay::round::RoundClock;
pub use gameplay::target::{HiddenTarget, Score};
