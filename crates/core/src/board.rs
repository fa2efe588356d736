//! Board module - one player's 10x20 grid
//!
//! Cells hold color codes: 0 empty, 1-7 locked piece colors, 8 garbage.
//! Storage is a flat row-major array, `y * WIDTH + x`, with `y = 0` at the top.
//! The grid only changes through locking, line-clear compaction and garbage
//! injection.

use crate::pieces::get_shape;
use crate::types::{
    Cell, PieceKind, Rotation, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, GARBAGE_COLOR,
};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_CELLS],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get cell at position (x, y), None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    /// Whether the `kind`/`rotation` shape placed with its box at (x, y) leaves
    /// the board or overlaps a filled cell.
    ///
    /// Pure in (grid, kind, rotation, x, y); stops at the first violation.
    pub fn collides(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        let shape = get_shape(kind, rotation);
        for col in 0..4 {
            for row in 0..4 {
                if shape[row][col] == EMPTY {
                    continue;
                }
                if !self.is_valid(x + col as i8, y + row as i8) {
                    return true;
                }
            }
        }
        false
    }

    /// Write every filled shape cell into the grid with its own color.
    ///
    /// Cells outside the board are skipped.
    pub fn lock_shape(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        let shape = get_shape(kind, rotation);
        for (row, line) in shape.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if cell != EMPTY {
                    self.set(x + col as i8, y + row as i8, cell);
                }
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Cells of row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Remove row `y`, shift everything above it down by one and empty the top row
    fn collapse_row(&mut self, y: usize) {
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(EMPTY);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Rows are scanned bottom to top; after a collapse the same row index is
    /// examined again since the row above has moved into it.
    pub fn clear_full_rows(&mut self) -> u8 {
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Shift the whole grid up one row and fill the bottom row with garbage,
    /// leaving `hole` empty. The top row is pushed off the board.
    pub fn push_garbage_row(&mut self, hole: u8) {
        self.cells.copy_within(WIDTH.., 0);
        let bottom = (HEIGHT - 1) * WIDTH;
        for (x, cell) in self.cells[bottom..].iter_mut().enumerate() {
            *cell = if x == hole as usize { EMPTY } else { GARBAGE_COLOR };
        }
    }

    /// Flat row-major view of the grid
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
