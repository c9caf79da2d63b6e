/// The eight compass directions as `(d_row, d_col)`, scanned in this order.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Wraps any coordinate onto `[0, size)`.
///
/// The board is a torus, so every integer is a valid coordinate:
/// `-1` is the last row/column, `size` is the first.
pub fn normalize(coord: i32, size: usize) -> usize {
    debug_assert!(size > 0, "normalize() requires a non-empty board");
    i128::from(coord).rem_euclid(size as i128) as usize
}
