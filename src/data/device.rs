//! Bulk views of a map's tables for transfer to and from accelerator memory.
//!
//! [`DeviceTables`] borrows the three tables in the layout a device kernel
//! reads and writes: a flat `u32` beta table with one row of
//! `dimensionality + 1` entries per dart, a `u32` vertex reference per row,
//! and the vertex records as raw bytes. Tables coming back from a device are
//! rebuilt with [`RawTables::from_device`] and go through the validated
//! import of [`CombinatorialMap::from_raw_tables`].

use crate::data::coordinates::VertexTable;
use crate::map_error::MapError;
use crate::topology::cmap::{CombinatorialMap, RawTables};
use crate::topology::relation::Dimensionality;

/// Borrowed view of every table of a map.
#[derive(Clone, Copy, Debug)]
pub struct DeviceTables<'a> {
    pub dimensionality: Dimensionality,
    /// Entries per dart row.
    pub stride: usize,
    pub betas: &'a [u32],
    pub vertex_refs: &'a [u32],
    pub vertex_bytes: &'a [u8],
}

impl DeviceTables<'_> {
    /// Number of rows, including the null dart.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.vertex_refs.len()
    }

    /// Number of darts, excluding the null dart.
    #[inline]
    pub fn n_darts(&self) -> usize {
        self.n_rows() - 1
    }

    /// Beta row of raw dart `d` (β0 first), or `None` past the table.
    #[inline]
    pub fn beta_row(&self, d: usize) -> Option<&[u32]> {
        self.betas.get(d * self.stride..(d + 1) * self.stride)
    }

    /// Byte size of the three buffers together.
    pub fn total_bytes(&self) -> usize {
        std::mem::size_of_val(self.betas)
            + std::mem::size_of_val(self.vertex_refs)
            + self.vertex_bytes.len()
    }
}

impl CombinatorialMap {
    /// Borrows the tables in device layout.
    pub fn device_tables(&self) -> DeviceTables<'_> {
        DeviceTables {
            dimensionality: self.dimensionality(),
            stride: self.dimensionality().stride(),
            betas: self.beta_table(),
            vertex_refs: self.vertex_refs(),
            vertex_bytes: self.vertex_table().as_bytes(),
        }
    }
}

impl RawTables {
    /// Copies buffers read back from a device. Only the vertex byte length is
    /// checked here; [`CombinatorialMap::from_raw_tables`] checks the rest.
    pub fn from_device(
        dimensionality: Dimensionality,
        betas: &[u32],
        vertex_refs: &[u32],
        vertex_bytes: &[u8],
    ) -> Result<Self, MapError> {
        Ok(Self {
            dimensionality,
            betas: betas.to_vec(),
            vertex_refs: vertex_refs.to_vec(),
            vertices: VertexTable::from_bytes(dimensionality, vertex_bytes)?,
        })
    }
}
