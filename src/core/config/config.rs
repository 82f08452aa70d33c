use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

/// Plain `(x: .., y: .., z: ..)` triple so RON files stay readable without glam's serde feature.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Vec3Config {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Default for Vec3Config {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }
}
impl Vec3Config {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}
impl Default for ColorConfig {
    fn default() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0 }
    }
}
impl ColorConfig {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
    pub fn to_color(self) -> Color {
        Color::srgb(self.r, self.g, self.b)
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Wheel Mode".into(),
            auto_close: 0.0,
        }
    }
}

/// Wheel motion tuning. Angular speeds are in degrees per second.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub speed: f32,
    pub steer_speed_deg: f32,
    pub roll_speed_deg: f32,
    pub radius: f32,
    pub thickness: f32,
    pub color: ColorConfig,
}
impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            steer_speed_deg: 90.0,
            roll_speed_deg: 150.0,
            radius: 1.0,
            thickness: 0.4,
            color: ColorConfig::new(0.85, 0.35, 0.2),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    pub max_spawn_distance: f32,
    pub capture_radius: f32,
    /// Re-rolls allowed when a fresh target lands inside the capture radius.
    pub respawn_attempts: u32,
    /// Fixed seed for reproducible placement; `None` seeds from entropy.
    pub seed: Option<u64>,
}
impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            max_spawn_distance: 20.0,
            capture_radius: 3.0,
            respawn_attempts: 16,
            seed: None,
        }
    }
}

impl TargetConfig {
    /// Half-width of the spawn square, or `None` when the full span is not a finite float.
    pub fn spawn_extent(&self) -> Option<f32> {
        let extent = self.max_spawn_distance.abs();
        (extent * 2.0).is_finite().then_some(extent)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoundConfig {
    pub duration_secs: i32,
    pub tick_secs: f32,
}
impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30,
            tick_secs: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position relative to the wheel; the camera keeps this offset while following.
    pub offset: Vec3Config,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3Config::new(0.0, 12.0, 18.0),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub clear_color: ColorConfig,
    pub ground_color: ColorConfig,
    pub ground_size: f32,
    pub light_direction: Vec3Config,
    pub light_color: ColorConfig,
    pub light_illuminance: f32,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: ColorConfig::new(0.5, 0.5, 0.5),
            ground_color: ColorConfig::new(0.3, 0.45, 0.3),
            ground_size: 60.0,
            light_direction: Vec3Config::new(0.0, -1.0, 0.0),
            light_color: ColorConfig::new(1.0, 1.0, 0.95),
            light_illuminance: 8_000.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HudConfig {
    pub font_size: f32,
    pub color: ColorConfig,
}
impl Default for HudConfig {
    fn default() -> Self {
        Self {
            font_size: 22.0,
            color: ColorConfig::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub wheel: WheelConfig,
    pub target: TargetConfig,
    pub round: RoundConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub hud: HudConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Deep-merge every readable RON layer (later layers win) and deserialize the result.
    /// Returns the config, the layers that were applied and any per-layer errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.wheel.speed <= 0.0 {
            w.push(format!("wheel.speed {} must be > 0", self.wheel.speed));
        }
        if self.wheel.steer_speed_deg <= 0.0 {
            w.push(format!(
                "wheel.steer_speed_deg {} must be > 0; steering disabled",
                self.wheel.steer_speed_deg
            ));
        }
        if self.wheel.roll_speed_deg < 0.0 {
            w.push("wheel.roll_speed_deg negative -> wheel spins against travel".into());
        }
        if self.wheel.radius <= 0.0 || self.wheel.thickness <= 0.0 {
            w.push("wheel.radius and wheel.thickness must be > 0".into());
        }
        if self.target.spawn_extent().is_none() {
            w.push(format!(
                "target.max_spawn_distance {} out of range; using default {}",
                self.target.max_spawn_distance,
                TargetConfig::default().max_spawn_distance
            ));
        } else if self.target.max_spawn_distance <= 0.0 {
            w.push(format!(
                "target.max_spawn_distance {} must be > 0",
                self.target.max_spawn_distance
            ));
        }
        if self.target.capture_radius <= 0.0 {
            w.push("target.capture_radius must be > 0; targets can never be reached".into());
        } else if self.target.capture_radius >= self.target.max_spawn_distance {
            w.push(format!(
                "target.capture_radius {} >= max_spawn_distance {}; targets captured almost immediately",
                self.target.capture_radius, self.target.max_spawn_distance
            ));
        }
        if self.round.duration_secs <= 0 {
            w.push(format!(
                "round.duration_secs {} must be > 0; round ends immediately",
                self.round.duration_secs
            ));
        }
        if self.round.tick_secs <= 0.0 {
            w.push(format!(
                "round.tick_secs {} must be > 0 (clamped to 0.01)",
                self.round.tick_secs
            ));
        }
        if self.scene.light_direction.to_vec3().length_squared() < 1e-6 {
            w.push("scene.light_direction is zero length; using straight down".into());
        }
        if self.scene.ground_size < self.target.max_spawn_distance * 2.0 {
            w.push(format!(
                "scene.ground_size {} smaller than spawn square {}; targets may spawn off the ground",
                self.scene.ground_size,
                self.target.max_spawn_distance * 2.0
            ));
        }
        if self.hud.font_size <= 0.0 {
            w.push("hud.font_size must be > 0".into());
        }
        w
    }
}

/// Command-line values that outrank every config layer, including hot-reloaded ones.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub duration_secs: Option<i32>,
    pub auto_close: Option<f32>,
}

impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut GameConfig) {
        if let Some(seed) = self.seed {
            cfg.target.seed = Some(seed);
        }
        if let Some(duration) = self.duration_secs {
            cfg.round.duration_secs = duration;
        }
        if let Some(secs) = self.auto_close {
            cfg.window.auto_close = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_tuning() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.wheel.speed, 10.0);
        assert_eq!(cfg.wheel.steer_speed_deg, 90.0);
        assert_eq!(cfg.wheel.roll_speed_deg, 150.0);
        assert_eq!(cfg.target.max_spawn_distance, 20.0);
        assert_eq!(cfg.target.capture_radius, 3.0);
        assert_eq!(cfg.round.duration_secs, 30);
        assert_eq!(cfg.round.tick_secs, 1.0);
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg: GameConfig = ron::from_str("(wheel: (speed: 4.0), round: (duration_secs: 5))")
            .expect("parse partial config");
        assert_eq!(cfg.wheel.speed, 4.0);
        assert_eq!(cfg.wheel.roll_speed_deg, 150.0);
        assert_eq!(cfg.round.duration_secs, 5);
        assert_eq!(cfg.round.tick_secs, 1.0);
        assert_eq!(cfg.target.seed, None);
    }

    #[test]
    fn validate_flags_unreachable_targets() {
        let mut cfg = GameConfig::default();
        cfg.target.capture_radius = 0.0;
        cfg.round.duration_secs = 0;
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("capture_radius")));
        assert!(warns.iter().any(|w| w.contains("duration_secs")));
    }

    #[test]
    fn validate_flags_spawn_extent_out_of_range() {
        let mut cfg = GameConfig::default();
        cfg.target.max_spawn_distance = 2.0e38;
        assert!(cfg.validate().iter().any(|w| w.contains("max_spawn_distance") && w.contains("out of range")));
        cfg.target.max_spawn_distance = f32::INFINITY;
        assert!(cfg.validate().iter().any(|w| w.contains("out of range")));
        cfg.target.max_spawn_distance = 20.0;
        assert!(!cfg.validate().iter().any(|w| w.contains("out of range")));
    }

    #[test]
    fn validate_flags_capture_radius_covering_spawn_square() {
        let mut cfg = GameConfig::default();
        cfg.target.capture_radius = cfg.target.max_spawn_distance;
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("captured almost immediately")), "{warns:?}");
    }

    #[test]
    fn validate_flags_non_positive_tick() {
        let mut cfg = GameConfig::default();
        cfg.round.tick_secs = 0.0;
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("round.tick_secs")), "{warns:?}");
    }

    #[test]
    fn validate_flags_zero_light_direction() {
        let mut cfg = GameConfig::default();
        cfg.scene.light_direction = Vec3Config::new(0.0, 0.0, 0.0);
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("light_direction")), "{warns:?}");
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut cfg = GameConfig::default();
        let overrides = ConfigOverrides { seed: Some(9), duration_secs: None, auto_close: Some(2.0) };
        overrides.apply(&mut cfg);
        assert_eq!(cfg.target.seed, Some(9));
        assert_eq!(cfg.round.duration_secs, RoundConfig::default().duration_secs);
        assert_eq!(cfg.window.auto_close, 2.0);
    }
}
