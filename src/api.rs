//! JavaScript-facing wrapper around [`Session`].
//!
//! Snapshots and outcomes cross the boundary as plain JS objects. Placements
//! report only success, matching what the board UI needs to decide whether
//! to call `advanceTurn`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::Session;
use crate::geometry;
use crate::types::{PlacementMode, Player};

#[wasm_bindgen]
pub struct Game {
    session: Session,
}

#[wasm_bindgen]
impl Game {
    /// `config` is `{ board_size, block_count?, obstacles? }`;
    /// `undefined` starts a classic 8x8 game.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Game, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::classic()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|err| JsError::new(&err.to_string()))?
        };
        let session = Session::new(config)?;
        Ok(Self { session })
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.to_game_state())
    }

    #[wasm_bindgen(js_name = getResult)]
    pub fn get_result(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.to_game_result())
    }

    /// `player` is 1 (black) or 2 (white); `mode` is `"stone"` or `"block"`.
    #[wasm_bindgen(js_name = getValidMoves)]
    pub fn get_valid_moves(&self, player: u8, mode: &str) -> Result<JsValue, JsError> {
        let player = Player::try_from(player)?;
        let mode: PlacementMode = mode.parse()?;
        to_js(&self.session.valid_moves(player, mode))
    }

    #[wasm_bindgen(js_name = placeStone)]
    pub fn place_stone(&mut self, row: i32, col: i32) -> bool {
        match self.session.place_stone(row, col) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("stone rejected: {err}");
                false
            }
        }
    }

    #[wasm_bindgen(js_name = placeBlock)]
    pub fn place_block(&mut self, row: i32, col: i32) -> bool {
        match self.session.place_block(row, col) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("block rejected: {err}");
                false
            }
        }
    }

    /// Returns `{status: "continue"}`, `{status: "pass", passed_player}` or
    /// `{status: "end"}`. Returns `null` once the game is over.
    #[wasm_bindgen(js_name = advanceTurn)]
    pub fn advance_turn(&mut self) -> Result<JsValue, JsError> {
        match self.session.advance_turn() {
            Ok(outcome) => to_js(&outcome),
            Err(err) => {
                log::debug!("turn advance rejected: {err}");
                Ok(JsValue::NULL)
            }
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}

/// Wraps a coordinate of the endless canvas onto the board.
#[wasm_bindgen]
pub fn normalize(coord: i32, size: u32) -> Result<u32, JsError> {
    if size == 0 {
        return Err(JsError::new("board size must be positive"));
    }
    Ok(geometry::normalize(coord, size as usize) as u32)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
