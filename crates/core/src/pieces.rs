//! Pieces module - fixed shape catalog
//!
//! Every (kind, rotation) pair maps to a precomputed 4x4 grid of color codes,
//! indexed `[row][col]` from the top-left of the piece bounding box. Nothing is
//! rotated at runtime, and rotation uses no wall kicks: a rotation either fits
//! in place or is reverted.

use crate::types::{Cell, PieceKind, Rotation};

/// A 4x4 grid of color codes, `[row][col]`
pub type ShapeGrid = [[Cell; 4]; 4];

/// Offsets `(col, row)` of the four filled cells of a shape
pub type PieceShape = [(i8, i8); 4];

const fn grid(rows: [[u8; 4]; 4], color: Cell) -> ShapeGrid {
    let mut out = [[0; 4]; 4];
    let mut r = 0;
    while r < 4 {
        let mut c = 0;
        while c < 4 {
            if rows[r][c] != 0 {
                out[r][c] = color;
            }
            c += 1;
        }
        r += 1;
    }
    out
}

const I: Cell = 4;
const O: Cell = 6;
const T: Cell = 5;
const S: Cell = 1;
const Z: Cell = 7;
const J: Cell = 2;
const L: Cell = 3;

const I_FLAT: [[u8; 4]; 4] = [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const O_BLOCK: [[u8; 4]; 4] = [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const S_FLAT: [[u8; 4]; 4] = [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const S_TALL: [[u8; 4]; 4] = [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]];
const Z_FLAT: [[u8; 4]; 4] = [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const Z_TALL: [[u8; 4]; 4] = [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]];

/// SHAPES[kind][rotation]
static SHAPES: [[ShapeGrid; 4]; 7] = [
    // I
    [
        grid(I_FLAT, I),
        grid([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]], I),
        grid(I_FLAT, I),
        grid([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]], I),
    ],
    // O
    [grid(O_BLOCK, O), grid(O_BLOCK, O), grid(O_BLOCK, O), grid(O_BLOCK, O)],
    // T
    [
        grid([[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], T),
        grid([[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]], T),
        grid([[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]], T),
        grid([[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]], T),
    ],
    // S
    [grid(S_FLAT, S), grid(S_TALL, S), grid(S_FLAT, S), grid(S_TALL, S)],
    // Z
    [grid(Z_FLAT, Z), grid(Z_TALL, Z), grid(Z_FLAT, Z), grid(Z_TALL, Z)],
    // J
    [
        grid([[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], J),
        grid([[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]], J),
        grid([[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]], J),
        grid([[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]], J),
    ],
    // L
    [
        grid([[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]], L),
        grid([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]], L),
        grid([[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]], L),
        grid([[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]], L),
    ],
];

/// Get the 4x4 color grid for a piece kind and rotation
#[inline]
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static ShapeGrid {
    &SHAPES[kind.index() as usize][rotation.index()]
}

/// Color of the shape cell at `(col, row)` of the bounding box, 0 when empty or outside
#[inline]
pub fn shape_cell(kind: PieceKind, rotation: Rotation, col: i8, row: i8) -> Cell {
    if !(0..4).contains(&col) || !(0..4).contains(&row) {
        return 0;
    }
    get_shape(kind, rotation)[row as usize][col as usize]
}

/// Offsets of the four filled cells, scanned column by column
pub fn get_minos(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let shape = get_shape(kind, rotation);
    let mut out = [(0i8, 0i8); 4];
    let mut n = 0;
    for col in 0..4 {
        for row in 0..4 {
            if shape[row][col] != 0 && n < 4 {
                out[n] = (col as i8, row as i8);
                n += 1;
            }
        }
    }
    out
}
