pub mod player;
pub mod session;
pub mod sound;
pub mod spawn;
