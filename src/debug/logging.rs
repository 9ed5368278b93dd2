use bevy::prelude::*;

use super::DebugState;
use crate::core::components::Obstacle;
use crate::gameplay::session::GameSession;

pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    session: Option<Res<GameSession>>,
    obstacles: Query<(), With<Obstacle>>,
) {
    state.frame_counter += 1;
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let Some(session) = session else {
        return;
    };
    info!(
        "SIM frame={} t={:.1}s phase={:?} lives={} shown={}s obstacles={}",
        state.frame_counter,
        time.elapsed_secs(),
        session.phase(),
        session.lives(),
        session.elapsed_secs(),
        obstacles.iter().count()
    );
}
