use bevy::prelude::*;

/// Marker for the flapping player body (dynamic rigid body + ball collider).
#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Which half of an obstacle pair a tube is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeSide {
    Top,
    Bottom,
}

/// A scrolling tube; the `Obstacle` query is the live obstacle set.
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub side: TubeSide,
}

/// Collider radius shared by the body and its sprite.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct PlayerRadius(pub f32);

/// Tags every entity owned by the play scene; all of them are despawned when it exits.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayScene;
