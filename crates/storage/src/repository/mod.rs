pub mod game;
pub mod memory;
