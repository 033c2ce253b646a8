mod game;
mod platform;

pub use game::Game;
pub use platform::{Platform, UnknownPlatform};
