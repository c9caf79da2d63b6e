use wasm_bindgen::prelude::*;

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod types;

pub use config::GameConfig;
pub use error::{ConfigError, MoveError};
pub use game::{Phase, Session};
pub use types::{Cell, GameResult, GameState, PlacementMode, Player, Position, TurnOutcome};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
