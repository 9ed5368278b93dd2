use bevy::audio::Volume;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::AppState;
use crate::core::arena::Arena;
use crate::core::components::{PlayScene, Player, PlayerRadius};
use crate::core::config::GameConfig;
use crate::core::system::system_order::SessionSet;
use crate::gameplay::session::SessionEffect;
use crate::gameplay::sound::SoundBank;
use crate::rendering::sprites::{IdleAnimation, SpriteBank};

const PLAYER_COLOR: Color = Color::srgb(0.98, 0.82, 0.18);

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_player)
            .add_systems(
                Update,
                (apply_player_effects, keep_player_in_arena)
                    .chain()
                    .in_set(SessionSet::Apply),
            );
    }
}

fn spawn_point(cfg: &GameConfig, arena: &Arena) -> Vec2 {
    arena.to_world(Vec2::new(cfg.player.spawn_x, cfg.player.spawn_y))
}

pub fn spawn_player(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    sprites: Option<Res<SpriteBank>>,
) {
    let radius = cfg.player.radius;
    let pos = spawn_point(&cfg, &arena);
    let bird = sprites.as_ref().and_then(|s| s.bird.as_ref());
    let sprite = match bird {
        Some(sheet) => sheet.sprite(radius * 2.0),
        None => Sprite::from_color(PLAYER_COLOR, Vec2::splat(radius * 2.0)),
    };
    let mut player = commands.spawn((
        Name::new("Player"),
        Player,
        PlayerRadius(radius),
        PlayScene,
        sprite,
        Transform::from_translation(pos.extend(1.0)),
        RigidBody::Dynamic,
        Collider::ball(radius),
        Velocity::zero(),
        GravityScale(1.0),
        LockedAxes::ROTATION_LOCKED,
        ActiveEvents::COLLISION_EVENTS,
        Ccd::enabled(),
    ));
    if let Some(sheet) = bird {
        player.insert(IdleAnimation::new(sheet.frames, cfg.sprites.idle_fps));
    }
}

fn apply_player_effects(
    mut commands: Commands,
    mut effects: EventReader<SessionEffect>,
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    sounds: Option<Res<SoundBank>>,
    mut q: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut GravityScale,
            Option<&mut IdleAnimation>,
        ),
        With<Player>,
    >,
) {
    for effect in effects.read() {
        let Ok((mut tf, mut vel, mut gravity, mut idle)) = q.single_mut() else {
            continue;
        };
        match effect {
            SessionEffect::Flap => {
                vel.linvel.y = cfg.physics.jump_velocity;
                if let Some(jump) = sounds.as_ref().and_then(|s| s.jump.clone()) {
                    commands.spawn((
                        AudioPlayer::new(jump),
                        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(cfg.audio.volume)),
                    ));
                }
            }
            SessionEffect::Freeze => {
                *vel = Velocity::zero();
                gravity.0 = 0.0;
                if let Some(idle) = idle.as_mut() {
                    idle.pause();
                }
            }
            SessionEffect::ResetField => {
                let pos = spawn_point(&cfg, &arena);
                tf.translation.x = pos.x;
                tf.translation.y = pos.y;
                *vel = Velocity::zero();
                gravity.0 = 1.0;
                if let Some(idle) = idle.as_mut() {
                    idle.resume();
                }
            }
            _ => {}
        }
    }
}

/// Floor and ceiling stop the player without costing a life.
fn keep_player_in_arena(
    arena: Res<Arena>,
    mut q: Query<(&mut Transform, &mut Velocity, &PlayerRadius), With<Player>>,
) {
    let half = arena.half_extents();
    for (mut tf, mut vel, radius) in &mut q {
        let top = half.y - radius.0;
        let bottom = -half.y + radius.0;
        if tf.translation.y > top {
            tf.translation.y = top;
            vel.linvel.y = vel.linvel.y.min(0.0);
        } else if tf.translation.y < bottom {
            tf.translation.y = bottom;
            vel.linvel.y = vel.linvel.y.max(0.0);
        }
        let left = -half.x + radius.0;
        let right = half.x - radius.0;
        if tf.translation.x < left || tf.translation.x > right {
            tf.translation.x = tf.translation.x.clamp(left, right);
            vel.linvel.x = 0.0;
        }
    }
}
