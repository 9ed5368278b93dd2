use bevy::prelude::*;

/// High-level app lifecycle state.
/// StartScreen -> Playing
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Title card with the start button.
    #[default]
    StartScreen,
    /// The play scene; a `GameSession` exists only here.
    Playing,
}
