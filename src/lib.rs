mod ability;
mod advisor;
mod board;
mod common;
mod config;
mod game;
mod grid;
mod logging;
mod mask;
mod ship;

pub use ability::*;
pub use advisor::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
pub use logging::init_logging;
pub use mask::{Mask, MaskError};
pub use ship::*;
