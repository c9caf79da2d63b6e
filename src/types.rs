use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;

pub const CELL_EMPTY: u8 = 0;
pub const CELL_BLACK: u8 = 1;
pub const CELL_WHITE: u8 = 2;
pub const CELL_BLOCK: u8 = 3;

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
    /// Inert obstacle: never flipped, never counted, stops capture scans.
    Block,
}

impl Cell {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => CELL_EMPTY,
            Self::Black => CELL_BLACK,
            Self::White => CELL_WHITE,
            Self::Block => CELL_BLOCK,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
            Self::Empty | Self::Block => None,
        }
    }
}

/// One of the two sides. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn stone(self) -> Cell {
        match self {
            Self::Black => Cell::Black,
            Self::White => Cell::White,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.stone().to_u8()
    }
}

impl TryFrom<u8> for Player {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            CELL_BLACK => Ok(Self::Black),
            CELL_WHITE => Ok(Self::White),
            other => Err(ParseError::InvalidPlayer(other)),
        }
    }
}

/// A normalized board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row: row as u8,
            col: col as u8,
        }
    }
}

/// What kind of placement a move enumeration is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Stone,
    Block,
}

impl FromStr for PlacementMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stone" => Ok(Self::Stone),
            "block" => Ok(Self::Block),
            other => Err(ParseError::InvalidMode(other.to_string())),
        }
    }
}

/// Decision made by `Session::advance_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TurnOutcome {
    /// The other player moves next.
    Continue,
    /// `passed_player` had no legal action; the mover goes again.
    Pass { passed_player: Player },
    /// Neither side can act, or the board reached a terminal shape.
    End,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells: 0=empty, 1=black, 2=white, 3=block.
    pub board: Vec<u8>,
    pub board_size: u8,
    pub current_player: u8,
    pub is_game_over: bool,
    pub black_count: u16,
    pub white_count: u16,
    pub black_blocks: u16,
    pub white_blocks: u16,
    /// Contract:
    /// - After a stone placement: the captured cells, in scan order.
    /// - After a block placement, or before any placement: empty.
    pub flipped: Vec<Position>,
    pub last_outcome: Option<TurnOutcome>,
}

/// Final tally once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Player>,
    pub black_count: u16,
    pub white_count: u16,
    pub black_percent: f32,
    pub white_percent: f32,
}
