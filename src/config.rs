use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ConfigError;

pub const CLASSIC_BOARD_SIZE: usize = 8;
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 32;

/// Blocks handed to each player when the caller does not choose a count.
static DEFAULT_BLOCK_COUNTS: Lazy<HashMap<usize, u16>> =
    Lazy::new(|| HashMap::from([(6, 3), (8, 5), (10, 8), (12, 12)]));

/// Settings a session is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    #[serde(default = "classic_board_size")]
    pub board_size: usize,
    /// Blocks per player. `None` picks the default for `board_size`.
    #[serde(default)]
    pub block_count: Option<u16>,
    /// Start with four fixed obstacle blocks around the centre.
    #[serde(default)]
    pub obstacles: bool,
}

impl GameConfig {
    /// Plain 8x8 game: no blocks, no obstacles.
    pub fn classic() -> Self {
        Self {
            board_size: CLASSIC_BOARD_SIZE,
            block_count: Some(0),
            obstacles: false,
        }
    }

    /// Block variant on a `board_size` board with the default block count.
    pub fn with_blocks(board_size: usize) -> Self {
        Self {
            board_size,
            block_count: None,
            obstacles: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSizeOutOfRange(self.board_size));
        }
        if self.board_size % 2 != 0 {
            return Err(ConfigError::OddBoardSize(self.board_size));
        }
        Ok(())
    }

    /// Per-player block inventory this config starts with, capped at a
    /// quarter of the board.
    pub fn initial_blocks(&self) -> u16 {
        let max = max_block_count(self.board_size);
        let requested = self
            .block_count
            .unwrap_or_else(|| default_block_count(self.board_size));

        if requested > max {
            log::warn!(
                "block count {requested} exceeds the maximum {max} for a {0}x{0} board; clamping",
                self.board_size
            );
            max
        } else {
            requested
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

pub fn default_block_count(board_size: usize) -> u16 {
    DEFAULT_BLOCK_COUNTS
        .get(&board_size)
        .copied()
        .unwrap_or((board_size * board_size / 16) as u16)
}

pub fn max_block_count(board_size: usize) -> u16 {
    (board_size * board_size / 4) as u16
}

fn classic_board_size() -> usize {
    CLASSIC_BOARD_SIZE
}
