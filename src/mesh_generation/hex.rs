//! Dart kernel for 3D hexahedral grids.
//!
//! Each cell owns 24 darts: six faces of four darts, dart
//! `1 + 24·cell + 4·face + edge`, with `cell = i + nx(j + ny·k)`. Faces are
//! oriented outward, so two faces sharing an edge (in the same cell or across
//! cells) run along it in opposite directions. The local β2 and β3 images are
//! resolved once at compile time by matching reversed edges.

use crate::topology::ids::NULL_DART;

pub const HEX_DARTS_PER_CELL: usize = 24;

/// Corner offsets of each face, in β1 order.
const FACES: [[[i8; 3]; 4]; 6] = [
    [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]], // z-
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]], // z+
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]], // y-
    [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]], // y+
    [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]], // x-
    [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]], // x+
];

/// Offset to the neighbouring cell across each face.
const NORMALS: [[i8; 3]; 6] = [
    [0, 0, -1],
    [0, 0, 1],
    [0, -1, 0],
    [0, 1, 0],
    [-1, 0, 0],
    [1, 0, 0],
];

const fn start(l: usize) -> [i8; 3] {
    FACES[l / 4][l % 4]
}

const fn end(l: usize) -> [i8; 3] {
    FACES[l / 4][(l + 1) % 4]
}

const fn shifted(c: [i8; 3], by: [i8; 3]) -> [i8; 3] {
    [c[0] + by[0], c[1] + by[1], c[2] + by[2]]
}

const fn same(a: [i8; 3], b: [i8; 3]) -> bool {
    a[0] == b[0] && a[1] == b[1] && a[2] == b[2]
}

/// Local dart of the same cell, on another face, running the reverse edge.
const fn local_beta2() -> [u8; 24] {
    let mut table = [0u8; 24];
    let mut l = 0;
    while l < 24 {
        let mut m = 0;
        while m < 24 {
            if m / 4 != l / 4 && same(start(m), end(l)) && same(end(m), start(l)) {
                table[l] = m as u8;
            }
            m += 1;
        }
        l += 1;
    }
    table
}

/// Local dart of the neighbour across the face of `l`, running the reverse
/// edge. Neighbour corners are shifted by the face normal.
const fn local_beta3() -> [u8; 24] {
    let mut table = [0u8; 24];
    let mut l = 0;
    while l < 24 {
        let normal = NORMALS[l / 4];
        let mut m = 0;
        while m < 24 {
            if same(shifted(start(m), normal), end(l)) && same(shifted(end(m), normal), start(l))
            {
                table[l] = m as u8;
            }
            m += 1;
        }
        l += 1;
    }
    table
}

pub(super) const HEX_BETA2: [u8; 24] = local_beta2();
pub(super) const HEX_BETA3: [u8; 24] = local_beta3();

/// Writes the beta row of hex dart `d` and returns its vertex.
pub(super) fn hex_dart(d: usize, [nx, ny, nz]: [usize; 3], row: &mut [u32]) -> u32 {
    let local = (d - 1) % HEX_DARTS_PER_CELL;
    let cell = (d - 1) / HEX_DARTS_PER_CELL;
    let (i, j, k) = (cell % nx, (cell / nx) % ny, cell / (nx * ny));
    let cell_base = d - local;
    let face_base = cell_base + local / 4 * 4;
    let edge = local % 4;

    row[0] = (face_base + (edge + 3) % 4) as u32;
    row[1] = (face_base + (edge + 1) % 4) as u32;
    row[2] = (cell_base + HEX_BETA2[local] as usize) as u32;

    let normal = NORMALS[local / 4];
    let neighbour = [
        i.checked_add_signed(normal[0] as isize),
        j.checked_add_signed(normal[1] as isize),
        k.checked_add_signed(normal[2] as isize),
    ];
    row[3] = match neighbour {
        [Some(ni), Some(nj), Some(nk)] if ni < nx && nj < ny && nk < nz => {
            let ncell = ni + nx * (nj + ny * nk);
            (1 + HEX_DARTS_PER_CELL * ncell + HEX_BETA3[local] as usize) as u32
        }
        _ => NULL_DART,
    };

    let c = start(local);
    let (vi, vj, vk) = (i + c[0] as usize, j + c[1] as usize, k + c[2] as usize);
    (((vk * (ny + 1)) + vj) * (nx + 1) + vi) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_beta2_pairs_faces_of_one_cell() {
        for l in 0..24 {
            let m = HEX_BETA2[l] as usize;
            assert_ne!(m / 4, l / 4, "dart {l} paired inside its own face");
            assert_eq!(HEX_BETA2[m] as usize, l);
        }
    }

    #[test]
    fn local_beta3_lands_on_the_opposite_face() {
        const OPPOSITE: [usize; 6] = [1, 0, 3, 2, 5, 4];
        for l in 0..24 {
            let m = HEX_BETA3[l] as usize;
            assert_eq!(m / 4, OPPOSITE[l / 4]);
            assert_eq!(HEX_BETA3[m] as usize, l);
        }
    }

    #[test]
    fn two_cells_share_a_face() {
        let n = [2, 1, 1];
        let mut row = [0u32; 4];
        // first dart of the x+ face of cell 0
        let d = 1 + 20;
        hex_dart(d, n, &mut row);
        let partner = row[3] as usize;
        assert!(partner > 24, "partner {partner} should live in cell 1");
        let mut back = [0u32; 4];
        hex_dart(partner, n, &mut back);
        assert_eq!(back[3] as usize, d);

        // x- face of cell 0 is on the boundary
        hex_dart(1 + 16, n, &mut row);
        assert_eq!(row[3], NULL_DART);
    }

    #[test]
    fn start_vertices_of_the_first_cell() {
        let n = [1, 1, 1];
        let mut row = [0u32; 4];
        let vertices: Vec<u32> = (1..=24).map(|d| hex_dart(d, n, &mut row)).collect();
        assert_eq!(&vertices[..4], &[0, 2, 3, 1]);
        assert_eq!(&vertices[4..8], &[4, 5, 7, 6]);
    }
}
