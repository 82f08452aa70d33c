pub mod config;

pub use config::{
    CameraConfig, ColorConfig, ConfigOverrides, GameConfig, HudConfig, RoundConfig, SceneConfig, TargetConfig,
    Vec3Config, WheelConfig, WindowConfig,
};
