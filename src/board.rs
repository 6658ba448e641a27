use thiserror::Error;

use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Player, Position};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("black and white overlap on squares {0:#018x}")]
    Overlap(u64),
    #[error("expected {NUM_SQUARES} cells, got {0}")]
    WrongCellCount(usize),
}

/// Othello board state represented by two bitboards.
///
/// Square index is `y * 8 + x`, so iterating indices in order visits rows
/// top to bottom and columns left to right within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (4,4)=white, (3,4)=black, (4,3)=black.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    pub fn from_bitboards(black: u64, white: u64) -> Result<Self, BoardError> {
        let overlap = black & white;
        if overlap != 0 {
            return Err(BoardError::Overlap(overlap));
        }
        Ok(Self { black, white })
    }

    /// Builds a board from row-major cells.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, BoardError> {
        if cells.len() != NUM_SQUARES {
            return Err(BoardError::WrongCellCount(cells.len()));
        }
        let mut board = Self {
            black: 0,
            white: 0,
        };
        for (pos, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Black => board.black |= bit(pos),
                Cell::White => board.white |= bit(pos),
                Cell::Empty => {}
            }
        }
        Ok(board)
    }

    pub fn cell(&self, pos: usize) -> Cell {
        let square = bit(pos);
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    pub fn cell_at(&self, pos: Position) -> Cell {
        self.cell(pos.index())
    }

    pub fn discs(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Discs that `player` would flip by placing at `pos`.
    pub fn flips_for(&self, pos: usize, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        Self::collect_flips(pos, me, opp)
    }

    /// Places one disc and flips captured discs.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, pos: usize, player: Player) -> u64 {
        let (me, opp) = self.sides(player);

        let flips = Self::collect_flips(pos, me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | bit(pos) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count_of(&self, player: Player) -> u8 {
        self.discs(player).count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(pos).code();
        }
        board
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        if ((me | opp) & bit(pos)) != 0 {
            return 0;
        }

        let (x, y) = pos_to_xy(pos);
        let mut flips = 0u64;

        for (dx, dy) in DIRECTIONS {
            let mut cx = x + dx;
            let mut cy = y + dy;
            let mut line = 0u64;

            // The run only commits once it is closed by one of our own discs.
            while in_bounds(cx, cy) {
                let square = bit(xy_to_pos(cx, cy));
                if (opp & square) != 0 {
                    line |= square;
                } else if (me & square) != 0 {
                    flips |= line;
                    break;
                } else {
                    break;
                }

                cx += dx;
                cy += dy;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

pub(crate) fn pos_to_xy(pos: usize) -> (i32, i32) {
    ((pos % BOARD_SIZE) as i32, (pos / BOARD_SIZE) as i32)
}

pub(crate) fn xy_to_pos(x: i32, y: i32) -> usize {
    y as usize * BOARD_SIZE + x as usize
}

pub(crate) fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

/// Iterates set bits from least to most significant.
pub(crate) fn bitmask_to_indices(mut mask: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let idx = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(idx)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(x: usize, y: usize) -> usize {
        y * BOARD_SIZE + x
    }

    #[test]
    fn t01_initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(idx(3, 2)) | bit(idx(2, 3)) | bit(idx(5, 4)) | bit(idx(4, 5));

        assert_eq!(board.legal_moves(Player::Black), expected);
    }

    #[test]
    fn t02_initial_cells_match_standard_diagonal_setup() {
        let board = Board::new();

        assert_eq!(board.cell(idx(3, 3)), Cell::White);
        assert_eq!(board.cell(idx(4, 4)), Cell::White);
        assert_eq!(board.cell(idx(3, 4)), Cell::Black);
        assert_eq!(board.cell(idx(4, 3)), Cell::Black);
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn t03_place_flips_opponent_discs_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(idx(3, 2), Player::Black);

        assert_eq!(flips, bit(idx(3, 3)));
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.empty_count(), 59);

        let cells = board.to_array();
        assert_eq!(cells[idx(3, 2)], 1);
        assert_eq!(cells[idx(3, 3)], 1);
        assert_eq!(cells[idx(4, 4)], 2);
    }

    #[test]
    fn t04_illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = board.place(idx(0, 0), Player::Black);

        assert_eq!(flips, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn t05_run_ending_at_edge_or_empty_flips_nothing() {
        // Row 0: B W W _ closes at x=0, row 2: W W _ runs into the edge.
        let mut cells = vec![Cell::Empty; NUM_SQUARES];
        cells[idx(0, 0)] = Cell::Black;
        cells[idx(1, 0)] = Cell::White;
        cells[idx(2, 0)] = Cell::White;
        cells[idx(0, 2)] = Cell::White;
        cells[idx(1, 2)] = Cell::White;
        let mut board = Board::from_cells(&cells).unwrap();

        assert_eq!(board.flips_for(idx(2, 2), Player::Black), 0);
        let flips = board.place(idx(3, 0), Player::Black);
        assert_eq!(flips, bit(idx(1, 0)) | bit(idx(2, 0)));
        assert_eq!(board.cell(idx(0, 2)), Cell::White);
    }

    #[test]
    fn t06_place_flips_in_several_directions_at_once() {
        let mut cells = vec![Cell::Empty; NUM_SQUARES];
        cells[idx(1, 1)] = Cell::Black;
        cells[idx(2, 2)] = Cell::White;
        cells[idx(3, 4)] = Cell::White;
        cells[idx(3, 5)] = Cell::Black;
        cells[idx(4, 3)] = Cell::White;
        let mut board = Board::from_cells(&cells).unwrap();

        let flips = board.place(idx(3, 3), Player::Black);

        assert_eq!(flips, bit(idx(2, 2)) | bit(idx(3, 4)));
        assert_eq!(board.cell(idx(4, 3)), Cell::White);
        assert_eq!(board.count(), (5, 1));
    }

    #[test]
    fn t07_from_bitboards_rejects_overlap() {
        let err = Board::from_bitboards(0b11, 0b10).unwrap_err();
        assert_eq!(err, BoardError::Overlap(0b10));
    }

    #[test]
    fn t08_from_cells_rejects_wrong_length() {
        let err = Board::from_cells(&[Cell::Empty; 10]).unwrap_err();
        assert_eq!(err, BoardError::WrongCellCount(10));
    }

    #[test]
    fn t09_bitmask_to_indices_yields_ascending_positions() {
        let indices: Vec<usize> = bitmask_to_indices(bit(3) | bit(40) | bit(0)).collect();
        assert_eq!(indices, vec![0, 3, 40]);
    }
}
