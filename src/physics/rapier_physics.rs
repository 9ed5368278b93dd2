use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Obstacle, Player};
use crate::core::config::GameConfig;
use crate::core::system::system_order::SessionSet;
use crate::gameplay::session::SessionEvent;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier for the playfield

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        let ppm = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.physics.pixels_per_meter)
            .filter(|ppm| *ppm > 0.0)
            .unwrap_or(50.0);
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(ppm))
            .add_systems(PostStartup, configure_gravity)
            .add_systems(Update, forward_player_collisions.in_set(SessionSet::Collect));
    }
}

/// RapierConfiguration lives on the default context entity (spawned during PreStartup).
pub fn configure_gravity(mut q_cfg: Query<&mut RapierConfiguration>, cfg: Res<GameConfig>) {
    if let Ok(mut rapier_cfg) = q_cfg.single_mut() {
        rapier_cfg.gravity = Vect::new(0.0, -cfg.physics.gravity);
        info!(target: "physics", "gravity set to {} px/s^2", cfg.physics.gravity);
    } else {
        warn!(target: "physics", "no Rapier context found; gravity left at default");
    }
}

pub fn is_player_obstacle_pair(
    a: Entity,
    b: Entity,
    players: &Query<(), With<Player>>,
    obstacles: &Query<(), With<Obstacle>>,
) -> bool {
    (players.contains(a) && obstacles.contains(b)) || (players.contains(b) && obstacles.contains(a))
}

/// Only contact starts matter; a persisting overlap produces no further events.
fn forward_player_collisions(
    mut collisions: EventReader<CollisionEvent>,
    players: Query<(), With<Player>>,
    obstacles: Query<(), With<Obstacle>>,
    mut events: EventWriter<SessionEvent>,
) {
    for ev in collisions.read() {
        if let CollisionEvent::Started(a, b, _flags) = ev {
            if is_player_obstacle_pair(*a, *b, &players, &obstacles) {
                debug!(target: "physics", "player hit obstacle: {a:?} <-> {b:?}");
                events.write(SessionEvent::CollisionDetected);
            }
        }
    }
}
