use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
    /// CSS selector of the canvas to bind to on wasm32 (ignored on native).
    pub canvas: Option<String>,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 530.0,
            title: "Flappy Tubes".into(),
            auto_close: 0.0,
            canvas: Some("#game-container".into()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration magnitude in px/s².
    pub gravity: f32,
    /// Upward speed set on each flap, px/s.
    pub jump_velocity: f32,
    pub pixels_per_meter: f32,
    /// Rapier wireframe at startup; only honored in builds with the `debug` feature.
    pub debug_render: bool,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1300.0,
            jump_velocity: 400.0,
            pixels_per_meter: 50.0,
            debug_render: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn point in screen space (origin top-left, y down).
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub radius: f32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_x: 100.0,
            spawn_y: 100.0,
            radius: 16.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Seconds between obstacle pairs.
    pub spawn_interval: f32,
    /// Leftward scroll speed, px/s.
    pub speed: f32,
    /// Vertical size of the passable gap.
    pub gap: f32,
    /// Minimum distance between the gap and the top/bottom edges.
    pub margin: f32,
    pub width: f32,
    /// Obstacles are despawned once their x (screen space) drops below `-despawn_margin`.
    pub despawn_margin: f32,
}
impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 3.5,
            speed: 150.0,
            gap: 100.0,
            margin: 100.0,
            width: 52.0,
            despawn_margin: 50.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub lives: u32,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self { lives: 3 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Asset path of the flap sound; `None` keeps the game silent.
    pub jump: Option<String>,
    pub volume: f32,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            jump: Some("audio/jump.wav".into()),
            volume: 1.0,
        }
    }
}

/// Image asset paths (relative to `assets/`). Any `None` falls back to flat colors.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpriteConfig {
    pub sky: Option<String>,
    pub tube: Option<String>,
    /// Horizontal strip of equally sized bird frames.
    pub bird: Option<String>,
    pub bird_frame_width: u32,
    pub bird_frame_height: u32,
    pub bird_frames: u32,
    /// Frames per second of the idle flap loop.
    pub idle_fps: f32,
    pub start_background: Option<String>,
    pub button: Option<String>,
}
impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            sky: Some("images/sky.png".into()),
            tube: Some("images/tube.png".into()),
            bird: Some("images/bird.png".into()),
            bird_frame_width: 34,
            bird_frame_height: 24,
            bird_frames: 3,
            idle_fps: 6.0,
            start_background: Some("images/start_background.png".into()),
            button: Some("images/button.png".into()),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub session: SessionConfig,
    pub audio: AudioConfig,
    pub sprites: SpriteConfig,
}

impl GameConfig {
    pub fn from_ron_str(data: &str) -> anyhow::Result<Self> {
        ron::from_str(data).context("parse RON")
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_ron_str(&data).with_context(|| format!("load config {}", path.display()))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Deep-merge every readable file in order (later files win field by field).
    /// Returns the config, the files that were applied, and per-file issues.
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
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
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
        }
        if self.physics.gravity <= 0.0 {
            w.push(format!(
                "physics.gravity {} should be > 0 (magnitude of downward pull)",
                self.physics.gravity
            ));
        }
        if self.physics.jump_velocity <= 0.0 {
            w.push("physics.jump_velocity must be > 0; flaps would push down".into());
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.player.radius <= 0.0 {
            w.push("player.radius must be > 0".into());
        }
        if !(0.0..=self.window.width).contains(&self.player.spawn_x)
            || !(0.0..=self.window.height).contains(&self.player.spawn_y)
        {
            w.push(format!(
                "player spawn ({}, {}) outside the {}x{} window",
                self.player.spawn_x, self.player.spawn_y, self.window.width, self.window.height
            ));
        }
        let ob = &self.obstacles;
        if ob.spawn_interval <= 0.0 {
            w.push("obstacles.spawn_interval must be > 0".into());
        }
        if ob.speed <= 0.0 {
            w.push("obstacles.speed must be > 0; tubes would never scroll past".into());
        }
        if ob.gap <= 0.0 {
            w.push("obstacles.gap must be > 0".into());
        }
        if ob.margin < 0.0 {
            w.push("obstacles.margin negative".into());
        }
        if ob.gap + 2.0 * ob.margin > self.window.height {
            w.push(format!(
                "obstacles.gap {} + 2 * margin {} exceeds window height {}; gap position is clamped",
                ob.gap, ob.margin, self.window.height
            ));
        }
        if self.session.lives == 0 {
            w.push("session.lives is 0; treated as 1".into());
        }
        if !(0.0..=2.0).contains(&self.audio.volume) {
            w.push(format!("audio.volume {} outside 0..2", self.audio.volume));
        }
        if self.physics.debug_render && !cfg!(feature = "debug") {
            w.push("physics.debug_render needs the `debug` cargo feature; ignored".into());
        }
        let sp = &self.sprites;
        if sp.bird.is_some() && (sp.bird_frame_width == 0 || sp.bird_frame_height == 0 || sp.bird_frames == 0) {
            w.push("sprites.bird frame size and count must be > 0; bird drawn as a flat disc".into());
        }
        if sp.idle_fps <= 0.0 {
            w.push(format!("sprites.idle_fps {} should be > 0; idle loop stops", sp.idle_fps));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.session.lives, 3);
        assert_eq!(cfg.window.width, 960.0);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg = GameConfig::from_ron_str("(obstacles: (gap: 140.0))").unwrap();
        assert_eq!(cfg.obstacles.gap, 140.0);
        assert_eq!(cfg.obstacles.margin, 100.0);
        assert_eq!(cfg.physics, PhysicsConfig::default());
    }

    #[test]
    fn oversized_gap_is_reported() {
        let mut cfg = GameConfig::default();
        cfg.obstacles.gap = 400.0;
        let warns = cfg.validate();
        assert!(warns.iter().any(|w| w.contains("exceeds window height")));
    }

    #[test]
    fn debug_render_without_debug_feature_is_reported() {
        let mut cfg = GameConfig::default();
        cfg.physics.debug_render = true;
        let reported = cfg.validate().iter().any(|w| w.contains("debug_render"));
        assert_eq!(reported, !cfg!(feature = "debug"));
    }

    #[test]
    fn empty_bird_strip_is_reported() {
        let mut cfg = GameConfig::default();
        cfg.sprites.bird_frames = 0;
        assert!(cfg.validate().iter().any(|w| w.contains("sprites.bird")));
        cfg.sprites.bird = None;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (cfg, err) = GameConfig::load_or_default("definitely/not/here.ron");
        assert_eq!(cfg, GameConfig::default());
        assert!(err.is_some());
    }
}
