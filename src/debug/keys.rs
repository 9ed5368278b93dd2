use bevy::prelude::*;
use bevy_rapier2d::render::DebugRenderContext;

use super::DebugState;

pub const WIREFRAME_KEY: KeyCode = KeyCode::F3;

pub fn debug_key_input_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut state: ResMut<DebugState>,
    ctx: Option<ResMut<DebugRenderContext>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(WIREFRAME_KEY) {
        state.wireframe = !state.wireframe;
        info!("WIREFRAME {} frame={}", if state.wireframe { "on" } else { "off" }, state.frame_counter);
    }
    if let Some(mut c) = ctx {
        if c.enabled != state.wireframe {
            c.enabled = state.wireframe;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f3_toggles_wireframe() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DebugState>()
            .add_systems(Update, debug_key_input_system);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(WIREFRAME_KEY);
        app.update();
        assert!(app.world().resource::<DebugState>().wireframe);

        // Held key does not toggle again.
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        app.update();
        assert!(app.world().resource::<DebugState>().wireframe);
    }
}
