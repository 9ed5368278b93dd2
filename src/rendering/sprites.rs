//! Image assets for the sky, tubes, bird and menu chrome.
//!
//! Everything here is optional: with no `SpriteBank` (headless apps) or a `None`
//! path in `sprites`, the spawners draw the flat colored shapes instead.

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::arena::Arena;
use crate::core::components::PlayScene;
use crate::core::config::{GameConfig, SpriteConfig};

/// The bird strip cut into equally sized frames.
#[derive(Debug, Clone)]
pub struct BirdSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub frames: usize,
    pub frame_size: UVec2,
}

impl BirdSheet {
    /// Sprite for the first frame, scaled so the bird is `height` px tall.
    pub fn sprite(&self, height: f32) -> Sprite {
        let aspect = self.frame_size.x as f32 / self.frame_size.y.max(1) as f32;
        Sprite {
            custom_size: Some(Vec2::new(height * aspect, height)),
            ..Sprite::from_atlas_image(
                self.image.clone(),
                TextureAtlas {
                    layout: self.layout.clone(),
                    index: 0,
                },
            )
        }
    }
}

#[derive(Resource, Debug, Default, Clone)]
pub struct SpriteBank {
    pub sky: Option<Handle<Image>>,
    pub tube: Option<Handle<Image>>,
    pub bird: Option<BirdSheet>,
    pub start_background: Option<Handle<Image>>,
    pub button: Option<Handle<Image>>,
}

impl SpriteBank {
    pub fn load(
        cfg: &SpriteConfig,
        server: &AssetServer,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) -> Self {
        let image = |path: &Option<String>| path.as_ref().map(|p| server.load::<Image>(p.clone()));
        let frame_size = UVec2::new(cfg.bird_frame_width, cfg.bird_frame_height);
        let bird = cfg
            .bird
            .as_ref()
            .filter(|_| cfg.bird_frames > 0 && frame_size.min_element() > 0)
            .map(|path| BirdSheet {
                image: server.load(path.clone()),
                layout: layouts.add(TextureAtlasLayout::from_grid(
                    frame_size,
                    cfg.bird_frames,
                    1,
                    None,
                    None,
                )),
                frames: cfg.bird_frames as usize,
                frame_size,
            });
        Self {
            sky: image(&cfg.sky),
            tube: image(&cfg.tube),
            bird,
            start_background: image(&cfg.start_background),
            button: image(&cfg.button),
        }
    }
}

/// Loops the atlas index of a sprite through its frames.
#[derive(Component, Debug)]
pub struct IdleAnimation {
    frames: usize,
    timer: Timer,
}

impl IdleAnimation {
    pub fn new(frames: usize, fps: f32) -> Self {
        let mut timer = Timer::from_seconds(if fps > 0.0 { 1.0 / fps } else { 1.0 }, TimerMode::Repeating);
        if fps <= 0.0 {
            timer.pause();
        }
        Self { frames, timer }
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn resume(&mut self) {
        self.timer.unpause();
    }

    pub fn is_paused(&self) -> bool {
        self.timer.paused()
    }
}

pub struct SpriteAssetsPlugin;

impl Plugin for SpriteAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_sky)
            .add_systems(Update, animate_idle);
    }

    // The initial state's OnEnter runs before Startup, so handles are created here.
    fn finish(&self, app: &mut App) {
        let Some(cfg) = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.sprites.clone())
        else {
            return;
        };
        let Some(server) = app.world().get_resource::<AssetServer>().cloned() else {
            return;
        };
        let bank = {
            let Some(mut layouts) = app
                .world_mut()
                .get_resource_mut::<Assets<TextureAtlasLayout>>()
            else {
                return;
            };
            SpriteBank::load(&cfg, &server, &mut layouts)
        };
        info!(
            target: "sprites",
            "sprite bank: sky={} tube={} bird={} menu={}",
            bank.sky.is_some(),
            bank.tube.is_some(),
            bank.bird.is_some(),
            bank.start_background.is_some()
        );
        app.insert_resource(bank);
    }
}

fn spawn_sky(mut commands: Commands, arena: Res<Arena>, sprites: Option<Res<SpriteBank>>) {
    let Some(sky) = sprites.and_then(|s| s.sky.clone()) else {
        return;
    };
    commands.spawn((
        Name::new("Sky"),
        PlayScene,
        Sprite {
            image: sky,
            custom_size: Some(Vec2::new(arena.width, arena.height)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));
}

pub fn animate_idle(time: Res<Time>, mut q: Query<(&mut IdleAnimation, &mut Sprite)>) {
    for (mut anim, mut sprite) in &mut q {
        anim.timer.tick(time.delta());
        let steps = anim.timer.times_finished_this_tick() as usize;
        if steps == 0 || anim.frames == 0 {
            continue;
        }
        let frames = anim.frames;
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = (atlas.index + steps) % frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn strip_sprite() -> Sprite {
        Sprite::from_atlas_image(
            Handle::default(),
            TextureAtlas {
                layout: Handle::default(),
                index: 0,
            },
        )
    }

    fn frame_of(app: &mut App) -> usize {
        let mut q = app.world_mut().query::<&Sprite>();
        q.single(app.world())
            .expect("one sprite")
            .texture_atlas
            .as_ref()
            .map(|a| a.index)
            .unwrap_or(usize::MAX)
    }

    #[test]
    fn idle_loop_wraps_through_frames() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(125)))
            .add_systems(Update, animate_idle);
        app.world_mut()
            .spawn((strip_sprite(), IdleAnimation::new(3, 4.0)));

        // First update has zero delta; then one frame every 250 ms.
        let mut seen = Vec::new();
        for _ in 0..9 {
            app.update();
            seen.push(frame_of(&mut app));
        }
        assert_eq!(seen, vec![0, 0, 1, 1, 2, 2, 0, 0, 1]);
    }

    #[test]
    fn paused_loop_holds_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .add_systems(Update, animate_idle);
        let mut anim = IdleAnimation::new(3, 10.0);
        anim.pause();
        app.world_mut().spawn((strip_sprite(), anim));
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(frame_of(&mut app), 0);
    }

    #[test]
    fn sky_only_spawns_with_an_image() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Arena::new(960.0, 530.0))
            .add_systems(Update, spawn_sky);
        app.update();
        let mut q = app.world_mut().query::<&Sprite>();
        assert_eq!(q.iter(app.world()).count(), 0);

        app.insert_resource(SpriteBank {
            sky: Some(Handle::default()),
            ..default()
        });
        app.update();
        let mut q = app.world_mut().query::<&Sprite>();
        let sizes: Vec<_> = q.iter(app.world()).map(|s| s.custom_size).collect();
        assert_eq!(sizes, vec![Some(Vec2::new(960.0, 530.0))]);
    }
}
