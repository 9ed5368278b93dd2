//! Session reducer: the only place lives, pause state and the survival clock change.

pub mod clock;
pub mod events;
pub mod machine;

pub use clock::SurvivalClock;
pub use events::{Banner, PointerTarget, SessionEffect, SessionEvent};
pub use machine::{GameSession, LifeLost, Phase};

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::core::system::system_order::SessionSet;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SessionEvent>()
            .add_event::<SessionEffect>()
            .configure_sets(
                Update,
                (SessionSet::Collect, SessionSet::Reduce, SessionSet::Apply)
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(OnEnter(AppState::Playing), start_session)
            .add_systems(OnExit(AppState::Playing), end_session)
            .add_systems(
                Update,
                (
                    emit_frame_update.in_set(SessionSet::Collect),
                    reduce_session_events.in_set(SessionSet::Reduce),
                ),
            );
    }
}

pub(crate) fn now_ms(time: &Time) -> u64 {
    time.elapsed().as_millis() as u64
}

fn start_session(mut commands: Commands, time: Res<Time>, cfg: Res<GameConfig>) {
    let session = GameSession::new(cfg.session.lives, now_ms(&time));
    info!(target: "session", "session started with {} lives", session.lives());
    commands.insert_resource(session);
}

fn end_session(mut commands: Commands) {
    commands.remove_resource::<GameSession>();
}

fn emit_frame_update(mut events: EventWriter<SessionEvent>) {
    events.write(SessionEvent::FrameUpdate);
}

/// Drains this frame's events through the state machine, in arrival order.
fn reduce_session_events(
    time: Res<Time>,
    session: Option<ResMut<GameSession>>,
    mut events: EventReader<SessionEvent>,
    mut effects: EventWriter<SessionEffect>,
) {
    let Some(mut session) = session else {
        events.clear();
        return;
    };
    let now = now_ms(&time);
    for ev in events.read() {
        let out = session.handle(*ev, now);
        if !out.is_empty() {
            debug!(target: "session", "{ev:?} -> {out:?}");
        }
        effects.write_batch(out);
    }
}
