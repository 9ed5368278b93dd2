use bevy::prelude::*;

use crate::core::config::GameConfig;

/// Preloaded sound handles; absent in headless apps.
#[derive(Resource, Debug, Default, Clone)]
pub struct SoundBank {
    pub jump: Option<Handle<AudioSource>>,
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sounds);
    }
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>, cfg: Res<GameConfig>) {
    let jump = cfg.audio.jump.as_ref().map(|path| {
        info!(target: "audio", "loading jump sound '{path}'");
        asset_server.load::<AudioSource>(path.clone())
    });
    commands.insert_resource(SoundBank { jump });
}
