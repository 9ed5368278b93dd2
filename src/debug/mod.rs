//! Debug module: feature gated session logging & physics wireframe.
//! Built only when compiled with `--features debug` (on by default).

#[cfg(feature = "debug")]
pub mod keys;
#[cfg(feature = "debug")]
mod logging;

#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier2d::render::RapierDebugRenderPlugin;

#[cfg(feature = "debug")]
use crate::core::config::GameConfig;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub wireframe: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            wireframe: false,
            log_interval: 5.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use keys::debug_key_input_system;
        use logging::debug_logging_system;

        let wireframe = app
            .world()
            .get_resource::<GameConfig>()
            .is_some_and(|c| c.physics.debug_render);
        app.insert_resource(DebugState {
            wireframe,
            ..default()
        })
        .add_plugins(RapierDebugRenderPlugin {
            enabled: wireframe,
            ..default()
        })
        .add_systems(Update, (debug_key_input_system, debug_logging_system));
    }
}
