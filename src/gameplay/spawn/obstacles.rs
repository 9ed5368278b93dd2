use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::state::AppState;
use crate::core::arena::Arena;
use crate::core::components::{Obstacle, PlayScene, TubeSide};
use crate::core::config::{GameConfig, ObstacleConfig};
use crate::core::system::system_order::SessionSet;
use crate::gameplay::session::{SessionEffect, SessionEvent};
use crate::rendering::sprites::SpriteBank;

const TUBE_COLOR: Color = Color::srgb(0.33, 0.75, 0.2);

/// Vertical extent of the passable opening, screen space (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapSpan {
    pub top: f32,
    pub bottom: f32,
}

impl GapSpan {
    pub fn size(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Uniformly place a `gap`-sized opening at least `margin` away from both edges.
/// If the arena is too short for the margins the gap is centered instead.
pub fn choose_gap<R: Rng + ?Sized>(rng: &mut R, arena_height: f32, gap: f32, margin: f32) -> GapSpan {
    let gap = gap.clamp(0.0, arena_height.max(0.0));
    let min = margin.max(0.0);
    let max = arena_height - min - gap;
    let top = if max >= min {
        rng.gen_range(min..=max)
    } else {
        (arena_height - gap) * 0.5
    };
    GapSpan { top, bottom: top + gap }
}

/// Optional fixed seed for gap placement (`--seed`).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnSeed(pub Option<u64>);

/// Spawn timer, gap RNG and the tubes currently on the field.
#[derive(Resource, Debug)]
pub struct ObstacleSpawner {
    pub timer: Timer,
    rng: StdRng,
    live: Vec<Entity>,
}

impl ObstacleSpawner {
    pub fn new(interval_secs: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            timer: Timer::from_seconds(interval_secs.max(0.01), TimerMode::Repeating),
            rng,
            live: Vec::new(),
        }
    }

    pub fn next_gap(&mut self, arena: &Arena, cfg: &ObstacleConfig) -> GapSpan {
        choose_gap(&mut self.rng, arena.height, cfg.gap, cfg.margin)
    }

    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    fn forget(&mut self, tube: Entity) {
        self.live.retain(|e| *e != tube);
    }
}

pub struct ObstacleSpawnPlugin;

impl Plugin for ObstacleSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnSeed>()
            .add_systems(OnEnter(AppState::Playing), setup_spawner)
            .add_systems(OnExit(AppState::Playing), teardown_spawner)
            .add_systems(Update, tick_spawn_timer.in_set(SessionSet::Collect))
            .add_systems(
                Update,
                (apply_obstacle_effects, despawn_passed_obstacles)
                    .chain()
                    .in_set(SessionSet::Apply),
            );
    }
}

fn setup_spawner(mut commands: Commands, cfg: Res<GameConfig>, seed: Res<SpawnSeed>) {
    commands.insert_resource(ObstacleSpawner::new(cfg.obstacles.spawn_interval, seed.0));
}

fn teardown_spawner(mut commands: Commands) {
    commands.remove_resource::<ObstacleSpawner>();
}

/// A paused timer does not advance, so no ticks are produced while frozen.
fn tick_spawn_timer(
    time: Res<Time>,
    spawner: Option<ResMut<ObstacleSpawner>>,
    mut events: EventWriter<SessionEvent>,
) {
    let Some(mut spawner) = spawner else { return; };
    spawner.timer.tick(time.delta());
    for _ in 0..spawner.timer.times_finished_this_tick() {
        events.write(SessionEvent::TimerTick);
    }
}

fn spawn_tube(
    commands: &mut Commands,
    arena: &Arena,
    cfg: &ObstacleConfig,
    image: Option<&Handle<Image>>,
    side: TubeSide,
    screen_top: f32,
    screen_bottom: f32,
) -> Option<Entity> {
    let height = screen_bottom - screen_top;
    if height <= 0.0 {
        return None;
    }
    let center = arena.to_world(Vec2::new(
        arena.width + cfg.width * 0.5,
        (screen_top + screen_bottom) * 0.5,
    ));
    let size = Vec2::new(cfg.width, height);
    // The texture has its rim on top; the upper tube hangs upside down.
    let sprite = match image {
        Some(image) => Sprite {
            image: image.clone(),
            custom_size: Some(size),
            flip_y: side == TubeSide::Top,
            ..default()
        },
        None => Sprite::from_color(TUBE_COLOR, size),
    };
    let id = commands
        .spawn((
            Name::new(match side {
                TubeSide::Top => "TubeTop",
                TubeSide::Bottom => "TubeBottom",
            }),
            Obstacle { side },
            PlayScene,
            sprite,
            Transform::from_translation(center.extend(0.0)),
            RigidBody::KinematicVelocityBased,
            Collider::cuboid(cfg.width * 0.5, height * 0.5),
            Velocity::linear(Vec2::new(-cfg.speed, 0.0)),
        ))
        .id();
    Some(id)
}

fn apply_obstacle_effects(
    mut commands: Commands,
    mut effects: EventReader<SessionEffect>,
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    spawner: Option<ResMut<ObstacleSpawner>>,
    sprites: Option<Res<SpriteBank>>,
    mut q: Query<(Entity, &mut Velocity), With<Obstacle>>,
) {
    let Some(mut spawner) = spawner else {
        effects.clear();
        return;
    };
    // Tubes spawned earlier in this batch are not visible to the query yet.
    let mut spawned: Vec<Entity> = Vec::new();
    let spawner = &mut *spawner;
    let tube_image = sprites.as_ref().and_then(|s| s.tube.clone());
    for effect in effects.read() {
        match effect {
            SessionEffect::SpawnObstaclePair => {
                let gap = spawner.next_gap(&arena, &cfg.obstacles);
                debug!(target: "spawner", "obstacle pair gap {:.0}..{:.0}", gap.top, gap.bottom);
                spawned.extend(spawn_tube(
                    &mut commands,
                    &arena,
                    &cfg.obstacles,
                    tube_image.as_ref(),
                    TubeSide::Top,
                    0.0,
                    gap.top,
                ));
                spawned.extend(spawn_tube(
                    &mut commands,
                    &arena,
                    &cfg.obstacles,
                    tube_image.as_ref(),
                    TubeSide::Bottom,
                    gap.bottom,
                    arena.height,
                ));
            }
            SessionEffect::Freeze => {
                for (_, mut vel) in &mut q {
                    *vel = Velocity::zero();
                }
                for &e in &spawned {
                    commands.entity(e).insert(Velocity::zero());
                }
                spawner.timer.pause();
            }
            SessionEffect::ResetField => {
                for (e, _) in &q {
                    commands.entity(e).despawn();
                }
                for e in spawned.drain(..) {
                    commands.entity(e).despawn();
                }
                spawner.live.clear();
                let interval = cfg.obstacles.spawn_interval.max(0.01);
                spawner
                    .timer
                    .set_duration(std::time::Duration::from_secs_f32(interval));
                spawner.timer.reset();
                spawner.timer.unpause();
            }
            _ => {}
        }
    }
    spawner.live.extend(spawned);
}

fn despawn_passed_obstacles(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    mut spawner: Option<ResMut<ObstacleSpawner>>,
    q: Query<(Entity, &Transform), With<Obstacle>>,
) {
    let trailing = -cfg.obstacles.despawn_margin;
    for (e, tf) in &q {
        if arena.to_screen(tf.translation.truncate()).x < trailing {
            commands.entity(e).despawn();
            if let Some(spawner) = spawner.as_mut() {
                spawner.forget(e);
            }
        }
    }
}
