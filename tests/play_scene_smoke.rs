use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::Velocity;

use flappy_tubes::core::arena::Arena;
use flappy_tubes::core::components::{Obstacle, Player};
use flappy_tubes::gameplay::player::PlayerPlugin;
use flappy_tubes::gameplay::session::SessionPlugin;
use flappy_tubes::gameplay::spawn::obstacles::{ObstacleSpawnPlugin, ObstacleSpawner, SpawnSeed};
use flappy_tubes::rendering::hud::{BannerRoot, HudPlugin, HudText};
use flappy_tubes::{AppState, GameConfig, GameSession, Phase, PointerTarget, SessionEvent};

// Headless play scene without physics or audio; events stand in for contacts and clicks.
fn play_app() -> App {
    let cfg = GameConfig::default();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
        .insert_resource(Arena::from_config(&cfg))
        .insert_resource(cfg)
        .insert_resource(SpawnSeed(Some(11)))
        .insert_state(AppState::Playing)
        .add_plugins((SessionPlugin, ObstacleSpawnPlugin, PlayerPlugin, HudPlugin));
    app.update();
    app
}

fn send(app: &mut App, ev: SessionEvent) {
    app.world_mut().send_event(ev);
    app.update();
}

fn session(app: &App) -> &GameSession {
    app.world().resource::<GameSession>()
}

fn obstacle_velocities(app: &mut App) -> Vec<Vec2> {
    let mut q = app
        .world_mut()
        .query_filtered::<&Velocity, With<Obstacle>>();
    q.iter(app.world()).map(|v| v.linvel).collect()
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let mut q = app.world_mut().query_filtered::<(), F>();
    q.iter(app.world()).count()
}

fn hud_text(app: &mut App, role: HudText) -> Option<String> {
    let mut q = app.world_mut().query::<(&Text, &HudText)>();
    q.iter(app.world())
        .find(|(_, r)| **r == role)
        .map(|(t, _)| t.0.clone())
}

fn player_translation(app: &mut App) -> Vec3 {
    let mut q = app.world_mut().query_filtered::<&Transform, With<Player>>();
    q.single(app.world()).expect("one player").translation
}

#[test]
fn enters_play_with_full_lives() {
    let mut app = play_app();
    assert_eq!(session(&app).lives(), 3);
    assert_eq!(session(&app).phase(), Phase::Playing);
    assert_eq!(count::<With<Player>>(&mut app), 1);
    assert_eq!(count::<With<Obstacle>>(&mut app), 0);
    assert_eq!(hud_text(&mut app, HudText::Lives).as_deref(), Some("Lives: 3"));
}

#[test]
fn collision_freezes_and_continue_clears_field() {
    let mut app = play_app();
    send(&mut app, SessionEvent::TimerTick);
    let vels = obstacle_velocities(&mut app);
    assert_eq!(vels.len(), 2);
    assert_eq!(app.world().resource::<ObstacleSpawner>().live().len(), 2);
    assert!(vels.iter().all(|v| v.x < 0.0));

    // Nudge the player so the reset is observable.
    {
        let mut q = app
            .world_mut()
            .query_filtered::<&mut Transform, With<Player>>();
        let mut tf = q.single_mut(app.world_mut()).expect("one player");
        tf.translation.y -= 40.0;
    }
    let spawn = {
        let arena = *app.world().resource::<Arena>();
        let cfg = app.world().resource::<GameConfig>();
        arena.to_world(Vec2::new(cfg.player.spawn_x, cfg.player.spawn_y))
    };

    send(&mut app, SessionEvent::CollisionDetected);
    assert_eq!(session(&app).lives(), 2);
    assert!(session(&app).is_paused());
    assert!(obstacle_velocities(&mut app).iter().all(|v| *v == Vec2::ZERO));
    assert_eq!(count::<With<BannerRoot>>(&mut app), 1);
    assert_eq!(hud_text(&mut app, HudText::Lives).as_deref(), Some("Lives: 2"));
    assert_eq!(hud_text(&mut app, HudText::ControlLabel).as_deref(), Some("Continue"));

    // A second contact while frozen costs nothing.
    send(&mut app, SessionEvent::CollisionDetected);
    assert_eq!(session(&app).lives(), 2);

    send(&mut app, SessionEvent::PointerDown(PointerTarget::RestartControl));
    assert_eq!(session(&app).phase(), Phase::Playing);
    assert_eq!(count::<With<Obstacle>>(&mut app), 0);
    assert!(app.world().resource::<ObstacleSpawner>().live().is_empty());
    assert_eq!(count::<With<BannerRoot>>(&mut app), 0);
    assert_eq!(player_translation(&mut app).truncate(), spawn);
}

#[test]
fn game_over_then_restart_resets_counters() {
    let mut app = play_app();
    for _ in 0..2 {
        send(&mut app, SessionEvent::CollisionDetected);
        send(&mut app, SessionEvent::PointerDown(PointerTarget::RestartControl));
    }
    send(&mut app, SessionEvent::TimerTick);
    send(&mut app, SessionEvent::CollisionDetected);
    assert!(session(&app).is_game_over());
    assert_eq!(hud_text(&mut app, HudText::ControlLabel).as_deref(), Some("Restart"));

    // Taps do nothing on the game over screen.
    send(&mut app, SessionEvent::PointerDown(PointerTarget::Playfield));
    assert!(session(&app).is_game_over());

    send(&mut app, SessionEvent::PointerDown(PointerTarget::RestartControl));
    assert_eq!(session(&app).lives(), 3);
    assert_eq!(session(&app).elapsed_secs(), 0);
    assert_eq!(count::<With<Obstacle>>(&mut app), 0);
    assert_eq!(hud_text(&mut app, HudText::Lives).as_deref(), Some("Lives: 3"));
    assert_eq!(hud_text(&mut app, HudText::Time).as_deref(), Some("Time: 0"));
}
