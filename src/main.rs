use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use flappy_tubes::gameplay::spawn::obstacles::SpawnSeed;
#[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
use flappy_tubes::interaction::session::config_hot_reload::ConfigReloadSettings;
use flappy_tubes::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(name = "flappy_tubes", version, about = "Flap through the tubes")]
struct Cli {
    /// RON config layers, applied in order (later files win).
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Fixed seed for tube gap placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds (overrides window.autoClose).
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
    /// Skip the start screen.
    #[arg(long)]
    skip_menu: bool,
}

/// Config problems found before logging is up; reported at startup.
#[derive(Resource, Default)]
struct ConfigIssues(Vec<String>);

#[cfg(any(target_arch = "wasm32", feature = "embedded_config"))]
fn load_config(_cli: &Cli) -> (GameConfig, Vec<PathBuf>, Vec<String>) {
    match GameConfig::from_ron_str(include_str!("../assets/config/game.ron")) {
        Ok(cfg) => (cfg, Vec::new(), Vec::new()),
        Err(e) => (
            GameConfig::default(),
            Vec::new(),
            vec![format!("embedded config: {e:#}")],
        ),
    }
}

#[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
fn load_config(cli: &Cli) -> (GameConfig, Vec<PathBuf>, Vec<String>) {
    let paths = if cli.configs.is_empty() {
        let mut defaults = vec![PathBuf::from("assets/config/game.ron")];
        let local = PathBuf::from("assets/config/game.local.ron");
        if local.exists() {
            defaults.push(local);
        }
        defaults
    } else {
        cli.configs.clone()
    };
    let (cfg, _used, errors) = GameConfig::load_layered(&paths);
    (cfg, paths, errors)
}

fn report_config_issues(issues: Res<ConfigIssues>) {
    for issue in &issues.0 {
        warn!(target: "config", "{issue}");
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    let cli = Cli::parse_from(["flappy_tubes"]);
    #[cfg(not(target_arch = "wasm32"))]
    let cli = Cli::parse();

    let (mut cfg, layers, mut issues) = load_config(&cli);
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    issues.extend(cfg.validate());
    if cfg.window.width <= 0.0 || cfg.window.height <= 0.0 {
        anyhow::bail!(
            "invalid window size {}x{}",
            cfg.window.width,
            cfg.window.height
        );
    }

    let window = Window {
        title: cfg.window.title.clone(),
        resolution: (cfg.window.width, cfg.window.height).into(),
        resizable: false,
        canvas: cfg.window.canvas.clone(),
        ..default()
    };

    let mut app = App::new();
    // Hot reload watches the same layers the game started from.
    #[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
    app.insert_resource(ConfigReloadSettings {
        paths: layers,
        ..default()
    });
    #[cfg(any(target_arch = "wasm32", feature = "embedded_config"))]
    let _ = layers;

    let exit = app
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .insert_resource(cfg)
        .insert_resource(SpawnSeed(cli.seed))
        .insert_resource(ConfigIssues(issues))
        .add_systems(Startup, report_config_issues)
        .add_plugins(GamePlugin {
            skip_menu: cli.skip_menu,
        })
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
