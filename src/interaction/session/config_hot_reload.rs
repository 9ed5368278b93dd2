use bevy::prelude::*;
use bevy_rapier2d::prelude::{RapierConfiguration, Vect};
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::arena::Arena;
use crate::core::config::GameConfig;
use crate::gameplay::spawn::obstacles::ObstacleSpawner;

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Polls the config files and applies edits while the game runs.
/// Window and spawn interval change immediately; tube speed/gap apply to the next pair.
/// `window.autoClose` keeps its startup value so a `--auto-close` override survives.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigReloadSettings>()
            .init_resource::<ConfigReloadState>()
            .add_systems(Startup, seed_mod_times)
            .add_systems(Update, poll_and_reload_config);
    }
}

fn files_changed(settings: &ConfigReloadSettings, state: &mut ConfigReloadState) -> bool {
    let mut dirty = false;
    for path in &settings.paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        match state.last_mod.insert(path.clone(), mod_time) {
            Some(seen) if mod_time <= seen => {}
            _ => dirty = true,
        }
    }
    dirty
}

// The files the game started from count as already applied.
fn seed_mod_times(settings: Res<ConfigReloadSettings>, mut state: ResMut<ConfigReloadState>) {
    files_changed(&settings, &mut state);
    debug!(target: "config", "watching {} config file(s)", state.last_mod.len());
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut arena: ResMut<Arena>,
    mut windows: Query<&mut Window>,
    mut rapier_cfg: Query<&mut RapierConfiguration>,
    spawner: Option<ResMut<ObstacleSpawner>>,
) {
    let interval = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - interval).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(interval));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    if !files_changed(&settings, &mut state) {
        return;
    }
    let (mut new_cfg, _used, errors) = GameConfig::load_layered(settings.paths.iter());
    new_cfg.window.auto_close = cfg_res.window.auto_close;
    for e in errors {
        warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
    }
    if *cfg_res == new_cfg {
        return;
    }
    for w in new_cfg.validate() {
        warn!(target: "config", "{w}");
    }
    info!(target: "config", "Config hot-reload applied");
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window
                .resolution
                .set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    *arena = Arena::from_config(&new_cfg);
    if let Ok(mut rc) = rapier_cfg.single_mut() {
        rc.gravity = Vect::new(0.0, -new_cfg.physics.gravity);
    }
    if let Some(mut spawner) = spawner {
        let secs = new_cfg.obstacles.spawn_interval.max(0.01);
        spawner
            .timer
            .set_duration(std::time::Duration::from_secs_f32(secs));
    }
    *cfg_res = new_cfg;
}
