//! Dart kernels for 2D grids.
//!
//! Quad cell `(i, j)` owns four darts starting at `1 + 4(i + nx·j)`:
//! bottom, right, top, left, each running counter-clockwise. A split cell
//! owns six: the lower-right triangle (bottom, diagonal, left) followed by
//! the upper-left one (diagonal, right, top).
//!
//! Row layout is `[β0, β1, β2]`; a `0` β2 image marks a boundary dart.

use crate::topology::ids::NULL_DART;

pub const QUAD_DARTS_PER_CELL: usize = 4;
pub const TRIANGLE_DARTS_PER_CELL: usize = 6;

/// Corner offsets `(dx, dy)` of the start vertex of each local quad dart.
const QUAD_CORNERS: [(usize, usize); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];
/// Same for the six darts of a split cell.
const TRIANGLE_CORNERS: [(usize, usize); 6] = [(0, 0), (1, 0), (0, 1), (0, 1), (1, 0), (1, 1)];

#[inline]
fn vertex(i: usize, j: usize, nx: usize, (dx, dy): (usize, usize)) -> u32 {
    ((j + dy) * (nx + 1) + i + dx) as u32
}

/// Writes the beta row of quad dart `d` and returns its vertex.
pub(super) fn quad_dart(d: usize, nx: usize, ny: usize, row: &mut [u32]) -> u32 {
    let local = (d - 1) % 4;
    let cell = (d - 1) / 4;
    let (i, j) = (cell % nx, cell / nx);
    let base = d - local;

    row[0] = (base + (local + 3) % 4) as u32;
    row[1] = (base + (local + 1) % 4) as u32;
    row[2] = match local {
        0 if j > 0 => (d + 2 - 4 * nx) as u32,
        1 if i + 1 < nx => (d + 6) as u32,
        2 if j + 1 < ny => (d + 4 * nx - 2) as u32,
        3 if i > 0 => (d - 6) as u32,
        _ => NULL_DART,
    };
    vertex(i, j, nx, QUAD_CORNERS[local])
}

/// Writes the beta row of triangle dart `d` and returns its vertex.
pub(super) fn triangle_dart(d: usize, nx: usize, ny: usize, row: &mut [u32]) -> u32 {
    let local = (d - 1) % 6;
    let cell = (d - 1) / 6;
    let (i, j) = (cell % nx, cell / nx);
    let tri_base = d - local % 3;

    row[0] = (tri_base + (local + 2) % 3) as u32;
    row[1] = (tri_base + (local + 1) % 3) as u32;
    row[2] = match local {
        // bottom <-> top of the cell below
        0 if j > 0 => (d + 5 - 6 * nx) as u32,
        // diagonal halves
        1 => (d + 2) as u32,
        3 => (d - 2) as u32,
        // left <-> right of the cell to the left
        2 if i > 0 => (d - 4) as u32,
        4 if i + 1 < nx => (d + 4) as u32,
        // top <-> bottom of the cell above
        5 if j + 1 < ny => (d - 5 + 6 * nx) as u32,
        _ => NULL_DART,
    };
    vertex(i, j, nx, TRIANGLE_CORNERS[local])
}
