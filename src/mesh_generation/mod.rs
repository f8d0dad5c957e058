//! Structured grid generators producing combinatorial maps.
//!
//! Every generator computes each dart's beta images and vertex reference
//! from its own index with closed formulas and writes only its own slots of
//! preallocated tables, so the fill is embarrassingly parallel. With the
//! `rayon` feature the fill runs on the rayon pool; otherwise the same
//! closure runs serially and produces identical tables.
//!
//! Use [`GridBuilder`] to describe the grid:
//!
//! ```rust
//! use cmap_grid::mesh_generation::GridBuilder;
//!
//! let map = GridBuilder::<2>::default()
//!     .n_cells([3, 2])
//!     .len_per_cell([1.0, 0.5])
//!     .build()?;
//! assert_eq!(map.dart_count(), 4 * 3 * 2);
//! assert_eq!(map.vertex_count(), 4 * 3);
//! # Ok::<(), cmap_grid::map_error::MapError>(())
//! ```

mod hex;
mod quad;

use num_traits::ToPrimitive;

use crate::data::coordinates::{CuVertex2, CuVertex3, VertexTable};
use crate::map_error::MapError;
use crate::topology::cmap::CombinatorialMap;
use crate::topology::relation::Dimensionality;

pub use hex::HEX_DARTS_PER_CELL;
pub use quad::{QUAD_DARTS_PER_CELL, TRIANGLE_DARTS_PER_CELL};

fn invalid_grid(message: impl Into<String>) -> MapError {
    MapError::Configuration(message.into())
}

/// Builder for a regular grid of `D` dimensions (2 or 3).
///
/// Two of [`n_cells`](Self::n_cells), [`len_per_cell`](Self::len_per_cell)
/// and [`lens`](Self::lens) are needed. When all three are given, `lens` is
/// ignored.
#[derive(Clone, Debug)]
pub struct GridBuilder<const D: usize> {
    origin: [f64; D],
    n_cells: Option<[usize; D]>,
    len_per_cell: Option<[f64; D]>,
    lens: Option<[f64; D]>,
    split_cells: bool,
}

impl<const D: usize> Default for GridBuilder<D> {
    fn default() -> Self {
        Self {
            origin: [0.0; D],
            n_cells: None,
            len_per_cell: None,
            lens: None,
            split_cells: false,
        }
    }
}

/// Fully resolved grid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDescriptor<const D: usize> {
    pub origin: [f64; D],
    pub n_cells: [usize; D],
    pub len_per_cell: [f64; D],
    pub split_cells: bool,
}

impl<const D: usize> GridDescriptor<D> {
    /// Number of cells, or [`MapError::Configuration`] if it overflows `usize`.
    pub fn cell_count(&self) -> Result<usize, MapError> {
        checked_product(self.n_cells.iter().map(|&n| Some(n)))
            .ok_or_else(|| invalid_grid(format!("{:?} cells overflow usize", self.n_cells)))
    }

    /// Number of grid nodes, or [`MapError::Configuration`] if it overflows
    /// `usize`.
    pub fn vertex_count(&self) -> Result<usize, MapError> {
        checked_product(self.n_cells.iter().map(|n| n.checked_add(1)))
            .ok_or_else(|| invalid_grid(format!("{:?} cells have too many nodes", self.n_cells)))
    }

    /// Coordinate of the grid node `idx`, computed in `f64`.
    #[inline]
    fn node(&self, idx: [usize; D]) -> [f64; D] {
        std::array::from_fn(|a| self.origin[a] + idx[a] as f64 * self.len_per_cell[a])
    }
}

impl<const D: usize> GridBuilder<D> {
    #[must_use]
    pub fn origin(mut self, origin: [f64; D]) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn n_cells(mut self, n_cells: [usize; D]) -> Self {
        self.n_cells = Some(n_cells);
        self
    }

    #[must_use]
    pub fn len_per_cell(mut self, len_per_cell: [f64; D]) -> Self {
        self.len_per_cell = Some(len_per_cell);
        self
    }

    /// Total length of the grid along each axis.
    #[must_use]
    pub fn lens(mut self, lens: [f64; D]) -> Self {
        self.lens = Some(lens);
        self
    }

    /// Splits every quadrilateral into two triangles (2D only).
    #[must_use]
    pub fn split_cells(mut self, split: bool) -> Self {
        self.split_cells = split;
        self
    }

    /// Checks the parameters and derives the missing one.
    pub fn descriptor(&self) -> Result<GridDescriptor<D>, MapError> {
        if self.origin.iter().any(|o| !o.is_finite()) {
            return Err(invalid_grid("origin must be finite"));
        }

        let (n_cells, len_per_cell) = match (self.n_cells, self.len_per_cell, self.lens) {
            (Some(n), Some(lpc), lens) => {
                check_lengths("len_per_cell", &lpc)?;
                if lens.is_some() {
                    log::warn!("n_cells and len_per_cell are both set; ignoring lens");
                }
                (n, lpc)
            }
            (Some(n), None, Some(lens)) => {
                check_lengths("lens", &lens)?;
                if n.contains(&0) {
                    return Err(invalid_grid("cell counts must be non-zero"));
                }
                (n, std::array::from_fn(|a| lens[a] / n[a] as f64))
            }
            (None, Some(lpc), Some(lens)) => {
                check_lengths("len_per_cell", &lpc)?;
                check_lengths("lens", &lens)?;
                let mut n = [0usize; D];
                for a in 0..D {
                    n[a] = (lens[a] / lpc[a])
                        .ceil()
                        .to_usize()
                        .ok_or_else(|| invalid_grid("cell count does not fit usize"))?;
                }
                (n, lpc)
            }
            _ => return Err(invalid_grid("insufficient grid parameters")),
        };

        if n_cells.contains(&0) {
            return Err(invalid_grid("cell counts must be non-zero"));
        }
        let grid = GridDescriptor {
            origin: self.origin,
            n_cells,
            len_per_cell,
            split_cells: self.split_cells,
        };
        grid.vertex_count()?;
        Ok(grid)
    }
}

fn checked_product(mut factors: impl Iterator<Item = Option<usize>>) -> Option<usize> {
    factors.try_fold(1usize, |acc, n| acc.checked_mul(n?))
}

fn check_lengths(name: &str, values: &[f64]) -> Result<(), MapError> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(invalid_grid(format!(
            "{name} must be finite and strictly positive, got {values:?}"
        )))
    }
}

/// Rows needed for `cells * per_cell` darts plus the null dart, if they fit
/// 32-bit ids.
fn dart_rows(cells: usize, per_cell: usize) -> Result<usize, MapError> {
    cells
        .checked_mul(per_cell)
        .and_then(|n| n.checked_add(1))
        .filter(|&rows| rows <= u32::MAX as usize)
        .ok_or_else(|| invalid_grid(format!("{cells} cells exceed 32-bit dart ids")))
}

/// Node count of `grid`, if every node fits a 32-bit vertex id.
fn vertex_slots<const D: usize>(grid: &GridDescriptor<D>) -> Result<usize, MapError> {
    let count = grid.vertex_count()?;
    if count > u32::MAX as usize {
        return Err(invalid_grid("vertex count exceeds 32-bit vertex ids"));
    }
    Ok(count)
}

impl GridBuilder<2> {
    /// Builds a quadrilateral grid, or a triangle grid with `split_cells`.
    pub fn build(self) -> Result<CombinatorialMap, MapError> {
        let grid = self.descriptor()?;
        let [nx, ny] = grid.n_cells;
        let per_cell = if grid.split_cells {
            TRIANGLE_DARTS_PER_CELL
        } else {
            QUAD_DARTS_PER_CELL
        };
        let rows = dart_rows(grid.cell_count()?, per_cell)?;
        let vertex_count = vertex_slots(&grid)?;
        log::debug!(
            "generating {nx}x{ny} {} grid: {} darts, {vertex_count} vertices",
            if grid.split_cells { "triangle" } else { "quad" },
            rows - 1,
        );

        let stride = Dimensionality::Two.stride();
        let mut betas = vec![0u32; rows * stride];
        let mut vertex_refs = vec![0u32; rows];
        if grid.split_cells {
            fill_darts(&mut betas, &mut vertex_refs, stride, |d, row| {
                quad::triangle_dart(d, nx, ny, row)
            });
        } else {
            fill_darts(&mut betas, &mut vertex_refs, stride, |d, row| {
                quad::quad_dart(d, nx, ny, row)
            });
        }

        let mut vertices = vec![CuVertex2::default(); vertex_count];
        fill_vertices(&mut vertices, |v| {
            let [x, y] = grid.node([v % (nx + 1), v / (nx + 1)]);
            CuVertex2::new(x as f32, y as f32)
        });

        Ok(CombinatorialMap::from_generated(
            Dimensionality::Two,
            betas,
            vertex_refs,
            VertexTable::Two(vertices),
        ))
    }
}

impl GridBuilder<3> {
    /// Builds a hexahedral grid. Splitting hexahedra is not supported.
    pub fn build(self) -> Result<CombinatorialMap, MapError> {
        let grid = self.descriptor()?;
        if grid.split_cells {
            return Err(invalid_grid("splitting hexahedral cells is not supported"));
        }
        let [nx, ny, nz] = grid.n_cells;
        let rows = dart_rows(grid.cell_count()?, HEX_DARTS_PER_CELL)?;
        let vertex_count = vertex_slots(&grid)?;
        log::debug!(
            "generating {nx}x{ny}x{nz} hex grid: {} darts, {vertex_count} vertices",
            rows - 1,
        );

        let stride = Dimensionality::Three.stride();
        let mut betas = vec![0u32; rows * stride];
        let mut vertex_refs = vec![0u32; rows];
        fill_darts(&mut betas, &mut vertex_refs, stride, |d, row| {
            hex::hex_dart(d, [nx, ny, nz], row)
        });

        let mut vertices = vec![CuVertex3::default(); vertex_count];
        let (px, py) = (nx + 1, ny + 1);
        fill_vertices(&mut vertices, |v| {
            let [x, y, z] = grid.node([v % px, (v / px) % py, v / (px * py)]);
            CuVertex3::new(x as f32, y as f32, z as f32)
        });

        Ok(CombinatorialMap::from_generated(
            Dimensionality::Three,
            betas,
            vertex_refs,
            VertexTable::Three(vertices),
        ))
    }
}

/// Fills every non-null row of the dart tables; `kernel` writes the beta row
/// of dart `d` and returns its vertex reference.
fn fill_darts<F>(betas: &mut [u32], vertex_refs: &mut [u32], stride: usize, kernel: F)
where
    F: Fn(usize, &mut [u32]) -> u32 + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        betas
            .par_chunks_mut(stride)
            .zip(vertex_refs.par_iter_mut())
            .enumerate()
            .skip(1)
            .for_each(|(d, (row, vref))| *vref = kernel(d, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        betas
            .chunks_mut(stride)
            .zip(vertex_refs.iter_mut())
            .enumerate()
            .skip(1)
            .for_each(|(d, (row, vref))| *vref = kernel(d, row));
    }
}

fn fill_vertices<V, F>(vertices: &mut [V], position: F)
where
    V: Send,
    F: Fn(usize) -> V + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        vertices
            .par_iter_mut()
            .enumerate()
            .for_each(|(v, slot)| *slot = position(v));
    }
    #[cfg(not(feature = "rayon"))]
    {
        vertices
            .iter_mut()
            .enumerate()
            .for_each(|(v, slot)| *slot = position(v));
    }
}

/// Unit-square quadrilateral grid with `nx`×`ny` cells at the origin.
pub fn unit_grid(nx: usize, ny: usize) -> Result<CombinatorialMap, MapError> {
    GridBuilder::<2>::default()
        .n_cells([nx, ny])
        .len_per_cell([1.0, 1.0])
        .build()
}

/// Like [`unit_grid`] with every cell split into two triangles.
pub fn unit_triangles(nx: usize, ny: usize) -> Result<CombinatorialMap, MapError> {
    GridBuilder::<2>::default()
        .n_cells([nx, ny])
        .len_per_cell([1.0, 1.0])
        .split_cells(true)
        .build()
}

/// Unit-cube hexahedral grid with `nx`×`ny`×`nz` cells at the origin.
pub fn hex_grid(nx: usize, ny: usize, nz: usize) -> Result<CombinatorialMap, MapError> {
    GridBuilder::<3>::default()
        .n_cells([nx, ny, nz])
        .len_per_cell([1.0, 1.0, 1.0])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_parameters_are_required() {
        let err = GridBuilder::<2>::default()
            .n_cells([2, 2])
            .descriptor()
            .unwrap_err();
        assert_eq!(
            err,
            MapError::Configuration("insufficient grid parameters".into())
        );
        assert!(GridBuilder::<3>::default().lens([1.0; 3]).build().is_err());
    }

    #[test]
    fn cell_length_is_derived_from_total_length() {
        let grid = GridBuilder::<2>::default()
            .n_cells([4, 2])
            .lens([2.0, 3.0])
            .descriptor()
            .unwrap();
        assert_eq!(grid.len_per_cell, [0.5, 1.5]);
    }

    #[test]
    fn cell_count_rounds_up() {
        let grid = GridBuilder::<2>::default()
            .len_per_cell([0.3, 1.0])
            .lens([1.0, 2.0])
            .descriptor()
            .unwrap();
        assert_eq!(grid.n_cells, [4, 2]);
        assert_eq!(grid.len_per_cell, [0.3, 1.0]);
    }

    #[test]
    fn lens_is_ignored_when_overdetermined() {
        let grid = GridBuilder::<2>::default()
            .n_cells([2, 2])
            .len_per_cell([1.0, 1.0])
            .lens([10.0, 10.0])
            .descriptor()
            .unwrap();
        assert_eq!(grid.len_per_cell, [1.0, 1.0]);
    }

    #[test]
    fn ignored_lens_is_not_validated() {
        let grid = GridBuilder::<2>::default()
            .n_cells([3, 1])
            .len_per_cell([1.0, 1.0])
            .lens([0.0, f64::NAN])
            .descriptor()
            .unwrap();
        assert_eq!(grid.n_cells, [3, 1]);
        let err = GridBuilder::<2>::default()
            .n_cells([3, 1])
            .lens([0.0, 1.0])
            .descriptor()
            .unwrap_err();
        assert!(matches!(err, MapError::Configuration(_)));
    }

    #[test]
    fn oversized_grids_are_configuration_errors() {
        let err = GridBuilder::<2>::default()
            .n_cells([usize::MAX, 2])
            .len_per_cell([1.0, 1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::Configuration(_)));

        let err = GridBuilder::<2>::default()
            .len_per_cell([1.0, 1.0])
            .lens([1e19, 4.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::Configuration(_)));

        let err = GridBuilder::<3>::default()
            .n_cells([1 << 22, 1 << 22, 1 << 22])
            .len_per_cell([1.0; 3])
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::Configuration(_)));

        let grid = GridDescriptor {
            origin: [0.0; 2],
            n_cells: [usize::MAX, 1],
            len_per_cell: [1.0; 2],
            split_cells: false,
        };
        assert_eq!(grid.cell_count(), Ok(usize::MAX));
        assert!(grid.vertex_count().is_err());
    }

    #[test]
    fn bad_lengths_are_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = GridBuilder::<2>::default()
                .n_cells([1, 1])
                .len_per_cell([1.0, bad])
                .descriptor()
                .unwrap_err();
            assert!(matches!(err, MapError::Configuration(_)));
        }
        assert!(unit_grid(0, 3).is_err());
    }

    #[test]
    fn hex_split_is_rejected() {
        let err = GridBuilder::<3>::default()
            .n_cells([1, 1, 1])
            .len_per_cell([1.0; 3])
            .split_cells(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::Configuration(_)));
    }

    fn row_by_row<F>(rows: usize, stride: usize, kernel: F) -> (Vec<u32>, Vec<u32>)
    where
        F: Fn(usize, &mut [u32]) -> u32,
    {
        let mut betas = vec![0u32; rows * stride];
        let mut refs = vec![0u32; rows];
        for d in 1..rows {
            refs[d] = kernel(d, &mut betas[d * stride..(d + 1) * stride]);
        }
        (betas, refs)
    }

    // Holds for whichever fill the `rayon` feature selects.
    #[test]
    fn built_tables_match_the_kernels_row_by_row() {
        let (nx, ny) = (5, 3);
        let quads = unit_grid(nx, ny).unwrap();
        let (betas, refs) = row_by_row(nx * ny * QUAD_DARTS_PER_CELL + 1, 3, |d, row| {
            quad::quad_dart(d, nx, ny, row)
        });
        assert_eq!(quads.beta_table(), &betas[..]);
        assert_eq!(quads.vertex_refs(), &refs[..]);

        let triangles = unit_triangles(nx, ny).unwrap();
        let (betas, refs) = row_by_row(nx * ny * TRIANGLE_DARTS_PER_CELL + 1, 3, |d, row| {
            quad::triangle_dart(d, nx, ny, row)
        });
        assert_eq!(triangles.beta_table(), &betas[..]);
        assert_eq!(triangles.vertex_refs(), &refs[..]);

        let n = [3, 2, 4];
        let hexes = hex_grid(n[0], n[1], n[2]).unwrap();
        let (betas, refs) = row_by_row(24 * HEX_DARTS_PER_CELL + 1, 4, |d, row| {
            hex::hex_dart(d, n, row)
        });
        assert_eq!(hexes.beta_table(), &betas[..]);
        assert_eq!(hexes.vertex_refs(), &refs[..]);
    }

    #[test]
    fn serial_fill_writes_every_row_but_the_null_one() {
        let mut betas = vec![7u32; 3 * 4];
        let mut refs = vec![7u32; 4];
        fill_darts(&mut betas, &mut refs, 3, |d, row| {
            row.fill(d as u32);
            d as u32 * 10
        });
        assert_eq!(&betas[..3], &[7, 7, 7]);
        assert_eq!(&betas[9..], &[3, 3, 3]);
        assert_eq!(refs, vec![7, 10, 20, 30]);
    }
}
