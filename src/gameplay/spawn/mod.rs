pub mod obstacles;
