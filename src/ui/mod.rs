pub mod input;
pub mod matrix;
pub mod page;
pub mod renderer;
pub mod sound;
pub mod transcript;
