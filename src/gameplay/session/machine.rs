use bevy::prelude::*;

use super::clock::SurvivalClock;
use super::events::{Banner, PointerTarget, SessionEffect, SessionEvent};

/// Details of the collision that paused the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeLost {
    pub remaining: u32,
    pub survived_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused(LifeLost),
    GameOver,
}

/// Lives, phase and survival clock of one play scene.
/// Invariants: `lives == 0` iff `phase == GameOver`; game over implies paused.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    initial_lives: u32,
    lives: u32,
    phase: Phase,
    clock: SurvivalClock,
}

impl GameSession {
    pub fn new(initial_lives: u32, now_ms: u64) -> Self {
        let initial_lives = initial_lives.max(1);
        Self {
            initial_lives,
            lives: initial_lives,
            phase: Phase::Playing,
            clock: SurvivalClock::started_at(now_ms),
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        !matches!(self.phase, Phase::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    /// Seconds shown on the HUD.
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.last_secs()
    }

    pub fn clock(&self) -> &SurvivalClock {
        &self.clock
    }

    pub fn handle(&mut self, event: SessionEvent, now_ms: u64) -> Vec<SessionEffect> {
        match self.phase {
            Phase::Playing => self.on_playing(event, now_ms),
            Phase::Paused(_) => self.on_paused(event, now_ms),
            Phase::GameOver => self.on_game_over(event, now_ms),
        }
    }

    fn on_playing(&mut self, event: SessionEvent, now_ms: u64) -> Vec<SessionEffect> {
        match event {
            SessionEvent::CollisionDetected => self.lose_life(),
            SessionEvent::PointerDown(PointerTarget::Playfield) => vec![SessionEffect::Flap],
            SessionEvent::PointerDown(PointerTarget::RestartControl) => Vec::new(),
            SessionEvent::TimerTick => vec![SessionEffect::SpawnObstaclePair],
            SessionEvent::FrameUpdate => {
                let before = self.clock.last_secs();
                let now = self.clock.sample(now_ms);
                if now != before {
                    vec![SessionEffect::ClockChanged(now)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn on_paused(&mut self, event: SessionEvent, now_ms: u64) -> Vec<SessionEffect> {
        match event {
            SessionEvent::PointerDown(PointerTarget::RestartControl) => {
                info!(target: "session", "continue with {} lives at {}s", self.lives, self.clock.last_secs());
                self.clock.resume(now_ms);
                self.phase = Phase::Playing;
                vec![SessionEffect::ClearBanner, SessionEffect::ResetField]
            }
            // Overlaps persisting across frames must not cost another life.
            _ => Vec::new(),
        }
    }

    fn on_game_over(&mut self, event: SessionEvent, now_ms: u64) -> Vec<SessionEffect> {
        match event {
            SessionEvent::PointerDown(PointerTarget::RestartControl) => {
                info!(target: "session", "restart after game over");
                self.lives = self.initial_lives;
                self.clock.reset(now_ms);
                self.phase = Phase::Playing;
                vec![
                    SessionEffect::ClearBanner,
                    SessionEffect::ResetField,
                    SessionEffect::LivesChanged(self.lives),
                    SessionEffect::ClockChanged(0),
                ]
            }
            _ => Vec::new(),
        }
    }

    fn lose_life(&mut self) -> Vec<SessionEffect> {
        self.lives = self.lives.saturating_sub(1);
        let mut effects = vec![SessionEffect::LivesChanged(self.lives), SessionEffect::Freeze];
        if self.lives > 0 {
            self.clock.bank();
            self.phase = Phase::Paused(LifeLost {
                remaining: self.lives,
                survived_secs: self.clock.last_secs(),
            });
            info!(target: "session", "life lost; {} remaining", self.lives);
            effects.push(SessionEffect::ShowBanner(Banner::LifeLost));
        } else {
            self.phase = Phase::GameOver;
            info!(target: "session", "game over after {}s", self.clock.last_secs());
            effects.push(SessionEffect::ShowBanner(Banner::GameOver));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAP: SessionEvent = SessionEvent::PointerDown(PointerTarget::Playfield);
    const RESTART: SessionEvent = SessionEvent::PointerDown(PointerTarget::RestartControl);

    fn assert_invariants(s: &GameSession) {
        assert_eq!(s.lives() == 0, s.is_game_over());
        if s.is_game_over() {
            assert!(s.is_paused());
        }
    }

    #[test]
    fn collision_pauses_and_costs_one_life() {
        let mut s = GameSession::new(3, 0);
        s.handle(SessionEvent::FrameUpdate, 4_200);
        let fx = s.handle(SessionEvent::CollisionDetected, 4_300);
        assert_eq!(s.lives(), 2);
        assert_eq!(
            s.phase(),
            Phase::Paused(LifeLost { remaining: 2, survived_secs: 4 })
        );
        assert_eq!(
            fx,
            vec![
                SessionEffect::LivesChanged(2),
                SessionEffect::Freeze,
                SessionEffect::ShowBanner(Banner::LifeLost),
            ]
        );
        assert_invariants(&s);
    }

    #[test]
    fn repeated_collisions_while_paused_are_ignored() {
        let mut s = GameSession::new(3, 0);
        s.handle(SessionEvent::CollisionDetected, 100);
        for t in 0..10 {
            assert!(s.handle(SessionEvent::CollisionDetected, 200 + t).is_empty());
        }
        assert_eq!(s.lives(), 2);
    }

    #[test]
    fn input_and_spawning_suppressed_while_paused() {
        let mut s = GameSession::new(3, 0);
        assert_eq!(s.handle(TAP, 10), vec![SessionEffect::Flap]);
        assert_eq!(
            s.handle(SessionEvent::TimerTick, 10),
            vec![SessionEffect::SpawnObstaclePair]
        );
        s.handle(SessionEvent::CollisionDetected, 20);
        assert!(s.handle(TAP, 30).is_empty());
        assert!(s.handle(SessionEvent::TimerTick, 30).is_empty());
        assert!(s.handle(SessionEvent::FrameUpdate, 99_000).is_empty());
        assert_eq!(s.elapsed_secs(), 0);
    }

    #[test]
    fn restart_control_ignored_while_playing() {
        let mut s = GameSession::new(3, 0);
        assert!(s.handle(RESTART, 10).is_empty());
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn continue_resumes_clock_from_banked_time() {
        let mut s = GameSession::new(3, 0);
        s.handle(SessionEvent::FrameUpdate, 5_600);
        s.handle(SessionEvent::CollisionDetected, 5_700);
        let shown_before = s.elapsed_secs();

        let fx = s.handle(RESTART, 30_000);
        assert_eq!(fx, vec![SessionEffect::ClearBanner, SessionEffect::ResetField]);
        assert_eq!(s.phase(), Phase::Playing);

        s.handle(SessionEvent::FrameUpdate, 30_010);
        assert_eq!(s.elapsed_secs(), shown_before);
        s.handle(SessionEvent::FrameUpdate, 32_000);
        assert_eq!(s.elapsed_secs(), shown_before + 2);
    }

    #[test]
    fn last_life_goes_straight_to_game_over() {
        let mut s = GameSession::new(1, 0);
        let fx = s.handle(SessionEvent::CollisionDetected, 10);
        assert!(s.is_game_over());
        assert!(fx.contains(&SessionEffect::ShowBanner(Banner::GameOver)));
        assert_invariants(&s);
    }

    #[test]
    fn restart_from_game_over_resets_everything() {
        let mut s = GameSession::new(2, 0);
        s.handle(SessionEvent::FrameUpdate, 3_000);
        s.handle(SessionEvent::CollisionDetected, 3_000);
        s.handle(RESTART, 4_000);
        s.handle(SessionEvent::FrameUpdate, 6_000);
        s.handle(SessionEvent::CollisionDetected, 6_000);
        assert!(s.is_game_over());

        let fx = s.handle(RESTART, 9_000);
        assert!(fx.contains(&SessionEffect::LivesChanged(2)));
        assert!(fx.contains(&SessionEffect::ClockChanged(0)));
        assert_eq!(s.lives(), 2);
        assert_eq!(s.elapsed_secs(), 0);
        assert_eq!(s.clock().accumulated_secs(), 0);
        assert!(!s.is_paused());
    }

    #[test]
    fn clock_effect_only_when_display_changes() {
        let mut s = GameSession::new(3, 0);
        assert!(s.handle(SessionEvent::FrameUpdate, 400).is_empty());
        assert_eq!(
            s.handle(SessionEvent::FrameUpdate, 1_000),
            vec![SessionEffect::ClockChanged(1)]
        );
        assert!(s.handle(SessionEvent::FrameUpdate, 1_900).is_empty());
    }

    #[test]
    fn lives_never_increase_under_collisions() {
        let mut s = GameSession::new(3, 0);
        let mut prev = s.lives();
        for i in 0..20u64 {
            s.handle(SessionEvent::CollisionDetected, i * 100);
            assert!(s.lives() <= prev);
            prev = s.lives();
            assert_invariants(&s);
            if i % 3 == 0 {
                // continue whenever possible, but never restart from game over
                if !s.is_game_over() {
                    s.handle(RESTART, i * 100 + 50);
                }
            }
        }
        assert_eq!(s.lives(), 0);
    }
}
