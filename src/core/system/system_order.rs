//! Central system ordering labels for the play scene.
//! Per frame (Update):
//! 1. Collect: input, collisions, spawn timer and frame ticks become `SessionEvent`s
//! 2. Reduce: the session state machine consumes events and emits `SessionEffect`s
//! 3. Apply: world + HUD systems react to effects
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SessionSet {
    Collect,
    Reduce,
    Apply,
}
