use crate::Piece;

/// Side length of the Peace and Reversi boards.
pub const SMALL_BOARD_SIZE: i8 = 8;
/// Side length of the Gomoku board.
pub const GOMOKU_BOARD_SIZE: i8 = 15;

/// A square grid of [`Piece`]s.
///
/// The board keeps a counter of occupied cells next to the cells themselves.
/// The counter only moves when a piece is placed on an empty cell with
/// [`Board::place()`], so re-coloring an existing piece (a Reversi flip, a
/// Gomoku bomb) never changes whether the board is full.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: i8,
    // Row-major, indexed by [row * size + col].
    cells: Vec<Piece>,
    occupied: usize,
}

impl Board {
    /// Creates an empty `size` x `size` board.
    pub fn new(size: i8) -> Self {
        assert!(size > 0, "board size must be positive, got {}", size);
        let side = size as usize;
        Self {
            size,
            cells: vec![Piece::Empty; side * side],
            occupied: 0,
        }
    }

    pub fn size(&self) -> i8 {
        self.size
    }

    pub fn is_in_bounds(&self, row: i8, col: i8) -> bool {
        (0..self.size).contains(&row) && (0..self.size).contains(&col)
    }

    /// Writes `piece` into the cell at `(row, col)`.
    ///
    /// Returns `false` without touching the board if the coordinates are out
    /// of bounds, or if `force` is `false` and the cell is not empty.
    ///
    /// With `force` set, an existing piece is overwritten and the occupancy
    /// counter is left alone. This is meant for re-coloring cells that are
    /// already occupied.
    pub fn place(&mut self, row: i8, col: i8, piece: Piece, force: bool) -> bool {
        let Some(idx) = self.arr_idx(row, col) else {
            return false;
        };
        if force {
            debug_assert!(
                self.cells[idx] != Piece::Empty && piece != Piece::Empty,
                "forced placement must re-color an occupied cell"
            );
        } else {
            if self.cells[idx] != Piece::Empty {
                return false;
            }
            if piece != Piece::Empty {
                self.occupied += 1;
            }
        }
        self.cells[idx] = piece;
        true
    }

    /// Is every cell occupied?
    pub fn is_full(&self) -> bool {
        self.occupied >= self.cells.len()
    }

    /// Returns the piece at `(row, col)`.
    ///
    /// Panics if the coordinates are out of bounds; check with
    /// [`Self::is_in_bounds()`] first.
    pub fn get(&self, row: i8, col: i8) -> Piece {
        match self.arr_idx(row, col) {
            Some(idx) => self.cells[idx],
            None => panic!(
                "({}, {}) is outside of a {}x{} board",
                row, col, self.size, self.size
            ),
        }
    }

    /// Like [`Self::get()`], but returns `None` for out-of-bounds coordinates.
    pub fn try_get(&self, row: i8, col: i8) -> Option<Piece> {
        self.arr_idx(row, col).map(|idx| self.cells[idx])
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|&&p| p == piece).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Piece)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &piece)| {
            // Casting is fine, boards are never larger than 15 x 15
            let row = (idx / self.size as usize) as i8;
            let col = (idx % self.size as usize) as i8;
            (row, col, piece)
        })
    }

    /// One row of the board, left to right.
    pub fn row(&self, row: i8) -> &[Piece] {
        let side = self.size as usize;
        let start = row as usize * side;
        &self.cells[start..start + side]
    }

    // Convert the 2D index into a "flat" array index
    fn arr_idx(&self, row: i8, col: i8) -> Option<usize> {
        if self.is_in_bounds(row, col) {
            Some(row as usize * self.size as usize + col as usize)
        } else {
            None
        }
    }
}
