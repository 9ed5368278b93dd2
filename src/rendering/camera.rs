use bevy::prelude::*;

/// Sky blue behind both screens.
pub const SKY_COLOR: Color = Color::srgb(0.44, 0.77, 0.81);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    // Bevy 0.16+: spawn Camera2d component directly; Required Components supply defaults.
    commands.spawn((Name::new("MainCamera"), Camera2d));
}
