use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::geometry::normalize;
use crate::types::{Cell, GameResult, GameState, PlacementMode, Player, Position, TurnOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Over,
}

/// One game from start to finish.
///
/// All mutation goes through `place_stone`, `place_block` and `advance_turn`;
/// a placement never switches the turn by itself.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    current_player: Player,
    phase: Phase,
    black_blocks: u16,
    white_blocks: u16,
    /// Set by a successful placement, cleared by `advance_turn`.
    placed_this_turn: bool,
    flipped: Vec<Position>,
    last_outcome: Option<TurnOutcome>,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let session = Self::from_validated(config);
        log::debug!(
            "new {0}x{0} session, {1} blocks per player, obstacles={2}",
            config.board_size,
            session.black_blocks,
            config.obstacles
        );
        Ok(session)
    }

    pub fn classic() -> Self {
        Self::from_validated(GameConfig::classic())
    }

    /// Restarts from the starting position of the same configuration.
    pub fn reset(&mut self) {
        *self = Self::from_validated(self.config);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn blocks(&self, player: Player) -> u16 {
        match player {
            Player::Black => self.black_blocks,
            Player::White => self.white_blocks,
        }
    }

    /// Places a stone for the current player at any (wrapped) coordinate.
    /// Returns the captured cells.
    pub fn place_stone(&mut self, row: i32, col: i32) -> Result<Vec<Position>, MoveError> {
        let (row, col) = self.check_placement(row, col)?;

        let flips = self.board.place(row, col, self.current_player);
        if flips.is_empty() {
            return Err(MoveError::NoCaptures(Position::new(row, col)));
        }

        log::debug!(
            "{:?} stone at ({row}, {col}) flips {}",
            self.current_player,
            flips.len()
        );
        self.placed_this_turn = true;
        self.flipped = flips.clone();
        Ok(flips)
    }

    /// Spends one of the current player's blocks on an empty square.
    pub fn place_block(&mut self, row: i32, col: i32) -> Result<Position, MoveError> {
        let (row, col) = self.check_placement(row, col)?;
        if self.blocks(self.current_player) == 0 {
            return Err(MoveError::NoBlocksLeft);
        }
        if !self.board.place_block(row, col) {
            return Err(MoveError::Occupied(Position::new(row, col)));
        }

        let remaining = match self.current_player {
            Player::Black => &mut self.black_blocks,
            Player::White => &mut self.white_blocks,
        };
        *remaining -= 1;

        log::debug!(
            "{:?} block at ({row}, {col}), {} left",
            self.current_player,
            *remaining
        );
        self.placed_this_turn = true;
        self.flipped.clear();
        Ok(Position::new(row, col))
    }

    /// Decides who acts next after a placement.
    ///
    /// Order of checks:
    /// 1. a full board or a colour with no stones ends the game;
    /// 2. the opponent can act: the turn passes to them;
    /// 3. only the mover can act: the opponent is skipped;
    /// 4. nobody can act: the game ends.
    pub fn advance_turn(&mut self) -> Result<TurnOutcome, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.placed_this_turn = false;

        let (black, white) = self.board.count();
        let outcome = if !self.board.has_empty() || black == 0 || white == 0 {
            TurnOutcome::End
        } else {
            let opponent = self.current_player.opponent();
            if self.can_act(opponent) {
                self.current_player = opponent;
                TurnOutcome::Continue
            } else if self.can_act(self.current_player) {
                TurnOutcome::Pass {
                    passed_player: opponent,
                }
            } else {
                TurnOutcome::End
            }
        };

        match outcome {
            TurnOutcome::End => {
                self.phase = Phase::Over;
                log::info!("game over: black {black}, white {white}");
            }
            TurnOutcome::Pass { passed_player } => log::info!("{passed_player:?} passes"),
            TurnOutcome::Continue => {}
        }

        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    /// `place_stone` followed by `advance_turn`.
    pub fn play_stone(&mut self, row: i32, col: i32) -> Result<TurnOutcome, MoveError> {
        self.place_stone(row, col)?;
        self.advance_turn()
    }

    /// `place_block` followed by `advance_turn`.
    pub fn play_block(&mut self, row: i32, col: i32) -> Result<TurnOutcome, MoveError> {
        self.place_block(row, col)?;
        self.advance_turn()
    }

    /// Squares where `player` may place in `mode`, row-major.
    pub fn valid_moves(&self, player: Player, mode: PlacementMode) -> Vec<Position> {
        match mode {
            PlacementMode::Stone => self.board.legal_moves(player),
            PlacementMode::Block if self.blocks(player) == 0 => Vec::new(),
            PlacementMode::Block => self.board.empty_squares().collect(),
        }
    }

    /// Whether `player` has any stone move, or a block and somewhere to put it.
    pub fn can_act(&self, player: Player) -> bool {
        self.board.has_legal_move(player) || (self.blocks(player) > 0 && self.board.has_empty())
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array(),
            board_size: self.board.size() as u8,
            current_player: self.current_player.into(),
            is_game_over: self.is_game_over(),
            black_count,
            white_count,
            black_blocks: self.black_blocks,
            white_blocks: self.white_blocks,
            flipped: self.flipped.clone(),
            last_outcome: self.last_outcome,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        let total = f32::from(black_count + white_count);

        let (winner, black_percent, white_percent) = if black_count > white_count {
            let black = share(black_count, total);
            (Some(Player::Black), black, 100.0 - black)
        } else if white_count > black_count {
            let white = share(white_count, total);
            (Some(Player::White), 100.0 - white, white)
        } else {
            (None, 50.0, 50.0)
        };

        GameResult {
            winner,
            black_count,
            white_count,
            black_percent,
            white_percent,
        }
    }

    fn from_validated(config: GameConfig) -> Self {
        let blocks = config.initial_blocks();
        let board = if config.obstacles {
            Board::with_obstacles(config.board_size)
        } else {
            Board::new(config.board_size)
        };
        Self {
            config,
            board,
            current_player: Player::Black,
            phase: Phase::InProgress,
            black_blocks: blocks,
            white_blocks: blocks,
            placed_this_turn: false,
            flipped: Vec::new(),
            last_outcome: None,
        }
    }

    /// Common gate for both placement kinds. Returns the normalized square.
    fn check_placement(&self, row: i32, col: i32) -> Result<(usize, usize), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if self.placed_this_turn {
            return Err(MoveError::AwaitingTurnAdvance);
        }

        let size = self.board.size();
        let (row, col) = (normalize(row, size), normalize(col, size));
        if self.board.get(row, col) != Cell::Empty {
            return Err(MoveError::Occupied(Position::new(row, col)));
        }
        Ok((row, col))
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.phase = Phase::InProgress;
        self.placed_this_turn = false;
        self.flipped.clear();
        self.last_outcome = None;
    }
}

/// Winner's share of the stones, rounded to one decimal.
fn share(count: u16, total: f32) -> f32 {
    (f32::from(count) / total * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn block_session(size: usize, blocks: u16) -> Session {
        Session::new(GameConfig {
            block_count: Some(blocks),
            ..GameConfig::with_blocks(size)
        })
        .expect("valid config")
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Session::classic();
        let state = game.to_game_state();

        assert_eq!(state.current_player, 1);
        assert_eq!(state.board_size, 8);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert_eq!((state.black_blocks, state.white_blocks), (0, 0));
        assert!(!state.is_game_over);
        assert!(state.flipped.is_empty());
        assert_eq!(state.last_outcome, None);
        assert_eq!(game.valid_moves(Player::Black, PlacementMode::Stone).len(), 4);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = Session::new(GameConfig::with_blocks(9)).unwrap_err();
        assert_eq!(err, ConfigError::OddBoardSize(9));
    }

    #[test]
    fn new_uses_default_block_table() {
        let game = Session::new(GameConfig::with_blocks(10)).expect("valid config");

        assert_eq!(game.blocks(Player::Black), 8);
        assert_eq!(game.blocks(Player::White), 8);
    }

    #[test]
    fn opening_move_hands_the_turn_to_white() {
        let mut game = Session::classic();

        let flips = game.place_stone(2, 3).expect("d3 is legal");
        assert_eq!(flips, vec![pos(3, 3)]);
        assert_eq!(game.current_player(), Player::Black);

        assert_eq!(game.advance_turn(), Ok(TurnOutcome::Continue));
        assert_eq!(game.current_player(), Player::White);

        // Perpendicular, diagonal and parallel replies.
        let replies = game.valid_moves(Player::White, PlacementMode::Stone);
        assert_eq!(replies, vec![pos(2, 2), pos(2, 4), pos(4, 2)]);
    }

    #[test]
    fn placement_accepts_wrapped_coordinates() {
        let mut game = Session::classic();

        let flips = game.place_stone(-6, 11).expect("(-6, 11) wraps to d3");

        assert_eq!(flips, vec![pos(3, 3)]);
        assert_eq!(game.board().get(2, 3), Cell::Black);
    }

    #[test]
    fn illegal_player_move_returns_error() {
        let mut game = Session::classic();

        assert_eq!(game.place_stone(0, 0), Err(MoveError::NoCaptures(pos(0, 0))));
    }

    #[test]
    fn rejection_on_occupied_cell_is_idempotent() {
        let mut game = Session::classic();
        let before = game.to_game_state();

        assert_eq!(game.place_stone(3, 3), Err(MoveError::Occupied(pos(3, 3))));
        assert_eq!(game.place_stone(3, 3), Err(MoveError::Occupied(pos(3, 3))));
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn second_placement_in_one_turn_is_rejected() {
        let mut game = block_session(8, 5);

        game.place_block(0, 0).expect("empty square");
        let before = game.to_game_state();

        assert_eq!(game.place_stone(2, 3), Err(MoveError::AwaitingTurnAdvance));
        assert_eq!(game.place_block(0, 1), Err(MoveError::AwaitingTurnAdvance));
        assert_eq!(game.to_game_state(), before);

        assert_eq!(game.advance_turn(), Ok(TurnOutcome::Continue));
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn place_block_spends_inventory() {
        let mut game = block_session(6, 1);

        assert_eq!(game.place_block(-1, -1), Ok(pos(5, 5)));
        assert_eq!(game.board().get(5, 5), Cell::Block);
        assert_eq!(game.blocks(Player::Black), 0);
        assert_eq!(game.blocks(Player::White), 1);
        game.advance_turn().expect("game continues");

        // White's block cannot overwrite black's.
        assert_eq!(game.place_block(5, 5), Err(MoveError::Occupied(pos(5, 5))));
        assert_eq!(game.place_stone(5, 5), Err(MoveError::Occupied(pos(5, 5))));
        assert_eq!(game.blocks(Player::White), 1);
    }

    #[test]
    fn place_block_without_inventory_is_rejected() {
        let mut game = Session::classic();
        let before = game.to_game_state();

        assert_eq!(game.place_block(0, 0), Err(MoveError::NoBlocksLeft));
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn block_moves_list_every_empty_square_only_with_inventory() {
        let game = block_session(6, 2);

        let moves = game.valid_moves(Player::White, PlacementMode::Block);
        assert_eq!(moves.len(), 32);
        assert!(!moves.contains(&pos(2, 2)));

        let classic = Session::classic();
        assert!(classic.valid_moves(Player::Black, PlacementMode::Block).is_empty());
    }

    #[test]
    fn flipped_tracks_the_last_placement() {
        let mut game = block_session(8, 2);

        game.play_stone(2, 3).expect("legal");
        assert_eq!(game.to_game_state().flipped, vec![pos(3, 3)]);

        game.play_block(0, 0).expect("legal");
        let state = game.to_game_state();
        assert!(state.flipped.is_empty());
        assert_eq!(state.last_outcome, Some(TurnOutcome::Continue));
    }

    #[test]
    fn pass_keeps_the_mover_on_turn() {
        // White plays (4, 0), capturing (4, 1). Black's last stone at (0, 4)
        // only sees empty squares or a white stone backed by a block, and
        // black holds no blocks, while white can still take it from (0, 3).
        let mut game = Session::classic();
        let board = Board::from_rows(&[
            "....BW#.",
            "........",
            "........",
            "........",
            ".BW.....",
            "........",
            "........",
            "........",
        ]);
        game.set_board_for_test(board, Player::White);

        game.place_stone(4, 0).expect("white captures (4, 1)");
        assert!(game.valid_moves(Player::Black, PlacementMode::Stone).is_empty());
        assert!(!game.valid_moves(Player::White, PlacementMode::Stone).is_empty());

        assert_eq!(
            game.advance_turn(),
            Ok(TurnOutcome::Pass {
                passed_player: Player::Black
            })
        );
        assert_eq!(game.current_player(), Player::White);
        assert!(!game.is_game_over());
    }

    #[test]
    fn opponent_with_blocks_is_not_passed() {
        let mut game = block_session(8, 1);
        let board = Board::from_rows(&[
            "....BW#.",
            "........",
            "........",
            "........",
            ".BW.....",
            "........",
            "........",
            "........",
        ]);
        game.set_board_for_test(board, Player::White);

        game.place_stone(4, 0).expect("white captures (4, 1)");

        assert_eq!(game.advance_turn(), Ok(TurnOutcome::Continue));
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(
            game.valid_moves(Player::Black, PlacementMode::Block).len(),
            game.board().empty_count()
        );
    }

    #[test]
    fn full_board_ends_the_game() {
        let mut game = block_session(4, 4);
        let board = Board::from_rows(&["BWBW", "WB#B", "BWBW", "WBWB"]);
        game.set_board_for_test(board, Player::Black);

        assert_eq!(game.advance_turn(), Ok(TurnOutcome::End));
        assert!(game.is_game_over());
        assert_eq!(game.phase(), Phase::Over);
    }

    #[test]
    fn wiped_out_colour_ends_the_game() {
        let mut game = block_session(6, 3);
        let board = Board::from_rows(&[
            "......",
            "......",
            "..BB..",
            "..BB..",
            "......",
            "......",
        ]);
        game.set_board_for_test(board, Player::Black);

        assert_eq!(game.advance_turn(), Ok(TurnOutcome::End));
        assert!(game.is_game_over());
    }

    #[test]
    fn both_sides_stuck_ends_the_game() {
        // Neither colour can capture and nobody holds blocks.
        let mut game = Session::classic();
        let board = Board::from_rows(&[
            "B.......",
            "........",
            "........",
            "........",
            "....W...",
            "........",
            "........",
            "........",
        ]);
        game.set_board_for_test(board, Player::Black);

        assert_eq!(game.advance_turn(), Ok(TurnOutcome::End));
        assert!(game.is_game_over());
    }

    #[test]
    fn nothing_is_accepted_after_game_over() {
        let mut game = Session::classic();
        let board = Board::from_rows(&[
            "B.......",
            "........",
            "........",
            "........",
            "....W...",
            "........",
            "........",
            "........",
        ]);
        game.set_board_for_test(board, Player::Black);
        game.advance_turn().expect("ends the game");
        let before = game.to_game_state();

        assert_eq!(game.place_stone(1, 1), Err(MoveError::GameOver));
        assert_eq!(game.place_block(1, 1), Err(MoveError::GameOver));
        assert_eq!(game.advance_turn(), Err(MoveError::GameOver));
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn reset_restores_the_starting_position() {
        let mut game = Session::new(GameConfig {
            obstacles: true,
            ..GameConfig::with_blocks(8)
        })
        .expect("valid config");
        let initial = game.to_game_state();

        game.play_block(0, 0).expect("legal");
        game.play_stone(2, 4).expect("legal");
        assert_ne!(game.to_game_state(), initial);

        game.reset();
        assert_eq!(game.to_game_state(), initial);
        assert_eq!(game.current_player(), Player::Black);
    }

    #[test]
    fn result_reports_winner_and_rounded_shares() {
        let mut game = Session::classic();
        let board = Board::from_rows(&[
            "BBB.....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "...W....",
        ]);
        game.set_board_for_test(board, Player::Black);

        let result = game.to_game_result();
        assert_eq!(result.winner, Some(Player::Black));
        assert_eq!((result.black_count, result.white_count), (3, 1));
        assert_eq!(result.black_percent, 75.0);
        assert_eq!(result.white_percent, 25.0);

        let board = Board::from_rows(&[
            "BW......",
            "W.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        game.set_board_for_test(board, Player::Black);
        let result = game.to_game_result();
        assert_eq!(result.winner, Some(Player::White));
        assert_eq!(result.white_percent, 66.7);
    }

    #[test]
    fn draw_reports_even_split() {
        let game = Session::classic();
        let result = game.to_game_result();

        assert_eq!(result.winner, None);
        assert_eq!(result.black_percent, 50.0);
        assert_eq!(result.white_percent, 50.0);
    }
}
