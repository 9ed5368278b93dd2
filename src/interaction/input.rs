use bevy::prelude::*;

use crate::core::system::system_order::SessionSet;
use crate::gameplay::session::{PointerTarget, SessionEvent};
use crate::rendering::hud::RestartButton;

/// Keys that act like a tap on the playfield.
pub const FLAP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::ArrowUp];
/// Keys that act like pressing the restart control while it is shown.
pub const RESTART_KEYS: [KeyCode; 2] = [KeyCode::Enter, KeyCode::KeyR];

pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, forward_pointer_presses.in_set(SessionSet::Collect));
    }
}

/// Presses over the restart control go to the control, everything else flaps.
pub fn forward_pointer_presses(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    controls: Query<Ref<Interaction>, With<RestartButton>>,
    mut events: EventWriter<SessionEvent>,
) {
    let control_shown = !controls.is_empty();
    let over_control = controls.iter().any(|i| *i != Interaction::None);
    let control_pressed = controls
        .iter()
        .any(|i| i.is_changed() && *i == Interaction::Pressed);

    if control_pressed || (control_shown && keys.any_just_pressed(RESTART_KEYS)) {
        events.write(SessionEvent::PointerDown(PointerTarget::RestartControl));
        return;
    }

    let tapped = mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    if (tapped && !over_control) || keys.any_just_pressed(FLAP_KEYS) {
        events.write(SessionEvent::PointerDown(PointerTarget::Playfield));
    }
}
