pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use app::state::AppState;
pub use core::config::{config::GameConfig, config::WindowConfig};
pub use gameplay::session::{GameSession, Phase, PointerTarget, SessionEffect, SessionEvent};
