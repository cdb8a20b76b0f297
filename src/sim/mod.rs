pub mod engine;
pub mod event;
pub mod game;
pub mod schedule;
pub mod step;
