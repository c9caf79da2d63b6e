use crate::geometry::{DIRECTIONS, normalize};
use crate::types::{Cell, Player, Position};

/// Square toroidal board: the top edge touches the bottom edge and the left
/// edge touches the right edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the starting diamond: the two centre rows/columns alternate
    /// white/black, with white on the top-left centre square.
    pub fn new(size: usize) -> Self {
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size * size],
        };
        let (c1, c2) = board.centre();
        board.set(c1, c1, Cell::White);
        board.set(c1, c2, Cell::Black);
        board.set(c2, c1, Cell::Black);
        board.set(c2, c2, Cell::White);
        board
    }

    /// Starting diamond plus four blocks on the diagonals touching it.
    pub fn with_obstacles(size: usize) -> Self {
        let mut board = Self::new(size);
        let (c1, c2) = board.centre();
        let (near, far) = (c1 - 1, c2 + 1);
        for (row, col) in [(near, near), (near, far), (far, near), (far, far)] {
            board.set(row, col, Cell::Block);
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Cells that `player` would capture by placing at `(row, col)`.
    ///
    /// Returns an empty list when the square is occupied or nothing is captured.
    /// Captures are listed direction by direction in `DIRECTIONS` order and
    /// contain no duplicates.
    pub fn flippable_stones(&self, row: usize, col: usize, player: Player) -> Vec<Position> {
        if self.get(row, col) != Cell::Empty {
            return Vec::new();
        }

        let mut seen = vec![false; self.cells.len()];
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let Some(line) = self.captured_line(row, col, dr, dc, player) else {
                continue;
            };
            for pos in line {
                let idx = pos.row as usize * self.size + pos.col as usize;
                if !seen[idx] {
                    seen[idx] = true;
                    flips.push(pos);
                }
            }
        }

        flips
    }

    /// Every empty square where `player` captures at least one stone, row-major.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        self.empty_squares()
            .filter(|pos| !self.captures_nothing(*pos, player))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.empty_squares()
            .any(|pos| !self.captures_nothing(pos, player))
    }

    /// Places a stone and flips captured stones.
    /// Returns the flipped cells. Returns an empty list when the move is illegal.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Vec<Position> {
        let flips = self.flippable_stones(row, col, player);
        if flips.is_empty() {
            return flips;
        }

        let stone = player.stone();
        self.set(row, col, stone);
        for pos in &flips {
            self.set(pos.row as usize, pos.col as usize, stone);
        }

        flips
    }

    /// Puts a block on an empty square. Returns `false` if the square is taken.
    pub fn place_block(&mut self, row: usize, col: usize) -> bool {
        if self.get(row, col) != Cell::Empty {
            return false;
        }
        self.set(row, col, Cell::Block);
        true
    }

    /// Returns `(black_count, white_count)`. Blocks are not stones.
    pub fn count(&self) -> (u16, u16) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty | Cell::Block => (black, white),
            })
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Empty).count()
    }

    pub fn has_empty(&self) -> bool {
        self.cells.contains(&Cell::Empty)
    }

    pub fn empty_squares(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(idx, _)| Position::new(idx / self.size, idx % self.size))
    }

    /// Converts the board to row-major `u8`s: 0=empty, 1=black, 2=white, 3=block.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.to_u8()).collect()
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    fn centre(&self) -> (usize, usize) {
        (self.size / 2 - 1, self.size / 2)
    }

    fn captures_nothing(&self, pos: Position, player: Player) -> bool {
        DIRECTIONS.iter().all(|&(dr, dc)| {
            self.captured_line(pos.row as usize, pos.col as usize, dr, dc, player)
                .is_none()
        })
    }

    /// Walks at most `size - 1` steps from `(row, col)` and returns the
    /// opponent run that `player` would capture in this direction.
    fn captured_line(
        &self,
        row: usize,
        col: usize,
        dr: i32,
        dc: i32,
        player: Player,
    ) -> Option<Vec<Position>> {
        let (row, col) = (row as i32, col as i32);
        let mut line = Vec::new();

        for step in 1..self.size as i32 {
            let r = normalize(row + dr * step, self.size);
            let c = normalize(col + dc * step, self.size);
            match self.get(r, c).owner() {
                Some(owner) if owner == player => {
                    return if line.is_empty() { None } else { Some(line) };
                }
                Some(_) => line.push(Position::new(r, c)),
                // Empty and Block both end the scan without a capture.
                None => return None,
            }
        }

        // Every square up to the origin is an opponent stone: the ring closes
        // on the new stone itself.
        Some(line)
    }

    /// Builds a board from rows of `.` (empty), `B`, `W` and `#` (block).
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let cells = rows
            .iter()
            .flat_map(|row| {
                assert_eq!(row.len(), size, "board rows must be square");
                row.chars().map(|ch| match ch {
                    '.' => Cell::Empty,
                    'B' => Cell::Black,
                    'W' => Cell::White,
                    '#' => Cell::Block,
                    other => panic!("unknown cell char {other:?}"),
                })
            })
            .collect();
        Self { size, cells }
    }
}
