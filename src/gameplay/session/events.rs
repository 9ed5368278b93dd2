use bevy::prelude::*;

/// Where a pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Anywhere except the restart control (also raised by the flap key).
    Playfield,
    /// The continue/restart button shown while paused or game over.
    RestartControl,
}

/// Everything the host reports to the session, one variant per callback source.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    CollisionDetected,
    PointerDown(PointerTarget),
    TimerTick,
    FrameUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banner {
    LifeLost,
    GameOver,
}

impl Banner {
    pub fn message(self) -> &'static str {
        match self {
            Banner::LifeLost => "You lost a life!",
            Banner::GameOver => "Game Over - No lives left!",
        }
    }

    pub fn control_label(self) -> &'static str {
        match self {
            Banner::LifeLost => "Continue",
            Banner::GameOver => "Restart",
        }
    }
}

/// Instructions from the session to the world and HUD.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Upward impulse on the player plus the jump sound.
    Flap,
    SpawnObstaclePair,
    /// Stop obstacles and player, disable player gravity, pause the spawn timer.
    Freeze,
    /// Clear obstacles, put the player back at spawn with gravity, restart the spawn timer.
    ResetField,
    LivesChanged(u32),
    ClockChanged(u64),
    ShowBanner(Banner),
    ClearBanner,
}
