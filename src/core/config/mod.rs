pub mod config;

pub use config::{
    AudioConfig, GameConfig, ObstacleConfig, PhysicsConfig, PlayerConfig, SessionConfig,
    SpriteConfig, WindowConfig,
};
