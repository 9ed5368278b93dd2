// This file is part of Flappy Tubes.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use super::menu::MenuPlugin;
use super::state::AppState;
use crate::core::arena::Arena;
use crate::core::components::PlayScene;
use crate::core::config::GameConfig;
#[cfg(feature = "debug")]
use crate::debug::DebugPlugin;
use crate::gameplay::player::PlayerPlugin;
use crate::gameplay::session::SessionPlugin;
use crate::gameplay::sound::SoundPlugin;
use crate::gameplay::spawn::obstacles::ObstacleSpawnPlugin;
use crate::interaction::input::PointerInputPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
#[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::sprites::SpriteAssetsPlugin;

/// Everything except the window/engine plugins; expects a `GameConfig` resource.
#[derive(Default)]
pub struct GamePlugin {
    /// Start directly in the play scene.
    pub skip_menu: bool,
}

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let arena = app
            .world()
            .get_resource::<GameConfig>()
            .map(Arena::from_config)
            .unwrap_or_else(|| Arena::from_config(&GameConfig::default()));
        app.insert_resource(arena);
        if self.skip_menu {
            app.insert_state(AppState::Playing);
        } else {
            app.init_state::<AppState>();
        }
        app.add_systems(OnExit(AppState::Playing), despawn_play_scene)
            .add_plugins((
                CameraPlugin,
                MenuPlugin,
                SessionPlugin,
                PhysicsSetupPlugin,
                PlayerPlugin,
                ObstacleSpawnPlugin,
                PointerInputPlugin,
                HudPlugin,
                SpriteAssetsPlugin,
                SoundPlugin,
                #[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
                ConfigHotReloadPlugin,
                AutoClosePlugin,
                #[cfg(feature = "debug")]
                DebugPlugin,
            ));
    }
}

fn despawn_play_scene(mut commands: Commands, q: Query<Entity, With<PlayScene>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
