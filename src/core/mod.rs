pub mod arena;
pub mod components;
pub mod config;
pub mod system;
