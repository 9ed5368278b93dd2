//! Playfield geometry. Gameplay numbers (spawn point, gap bounds, despawn bound)
//! are authored in screen space (origin top-left, y down) and converted to Bevy's
//! centered, y-up world space here.
use bevy::prelude::*;

use crate::core::config::GameConfig;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self::new(cfg.window.width, cfg.window.height)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.width * 0.5, self.height * 0.5 - screen.y)
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_world_extents() {
        let arena = Arena::new(960.0, 530.0);
        assert_eq!(arena.to_world(Vec2::ZERO), Vec2::new(-480.0, 265.0));
        assert_eq!(arena.to_world(Vec2::new(960.0, 530.0)), Vec2::new(480.0, -265.0));
        let p = Vec2::new(100.0, 100.0);
        assert_eq!(arena.to_screen(arena.to_world(p)), p);
    }
}
