//! Vertex coordinate records and the vertex table.
//!
//! [`CuVertex2`] and [`CuVertex3`] are `repr(C)` arrays of `f32` with no
//! padding, so a vertex table can be handed to accelerator memory as raw
//! bytes. A table holds records of exactly one kind, fixed by the map's
//! [`Dimensionality`].

use bytemuck::{Pod, Zeroable};
use static_assertions::{assert_eq_align, assert_eq_size};

use crate::map_error::MapError;
use crate::topology::relation::Dimensionality;

/// 2D coordinate record, layout-compatible with `float[2]`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, serde::Serialize, serde::Deserialize,
)]
#[repr(C)]
pub struct CuVertex2 {
    pub data: [f32; 2],
}

/// 3D coordinate record, layout-compatible with `float[3]`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, serde::Serialize, serde::Deserialize,
)]
#[repr(C)]
pub struct CuVertex3 {
    pub data: [f32; 3],
}

assert_eq_size!(CuVertex2, [f32; 2]);
assert_eq_size!(CuVertex3, [f32; 3]);
assert_eq_align!(CuVertex2, f32);
assert_eq_align!(CuVertex3, f32);

impl CuVertex2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    #[inline]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }
}

impl CuVertex3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    #[inline]
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    #[inline]
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    #[inline]
    pub const fn z(&self) -> f32 {
        self.data[2]
    }
}

fn midpoint<const N: usize>(a: [f32; N], b: [f32; N]) -> [f32; N] {
    std::array::from_fn(|i| ((f64::from(a[i]) + f64::from(b[i])) * 0.5) as f32)
}

/// A position of either dimension, as accepted by
/// [`CombinatorialMap::add_vertex`](crate::topology::cmap::CombinatorialMap::add_vertex).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    Two(CuVertex2),
    Three(CuVertex3),
}

impl Position {
    #[inline]
    pub fn dimension(&self) -> usize {
        match self {
            Position::Two(_) => 2,
            Position::Three(_) => 3,
        }
    }

    /// Coordinate components in axis order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        match self {
            Position::Two(v) => &v.data,
            Position::Three(v) => &v.data,
        }
    }
}

impl From<CuVertex2> for Position {
    fn from(v: CuVertex2) -> Self {
        Position::Two(v)
    }
}

impl From<CuVertex3> for Position {
    fn from(v: CuVertex3) -> Self {
        Position::Three(v)
    }
}

impl From<[f32; 2]> for Position {
    fn from(data: [f32; 2]) -> Self {
        Position::Two(CuVertex2 { data })
    }
}

impl From<[f32; 3]> for Position {
    fn from(data: [f32; 3]) -> Self {
        Position::Three(CuVertex3 { data })
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Position::Two(CuVertex2::new(x, y))
    }
}

impl From<(f32, f32, f32)> for Position {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Position::Three(CuVertex3::new(x, y, z))
    }
}

/// Dense vertex table; the variant is fixed for the lifetime of a map.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VertexTable {
    Two(Vec<CuVertex2>),
    Three(Vec<CuVertex3>),
}

impl VertexTable {
    pub fn with_capacity(dimensionality: Dimensionality, capacity: usize) -> Self {
        match dimensionality {
            Dimensionality::Two => VertexTable::Two(Vec::with_capacity(capacity)),
            Dimensionality::Three => VertexTable::Three(Vec::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            VertexTable::Two(_) => Dimensionality::Two,
            VertexTable::Three(_) => Dimensionality::Three,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            VertexTable::Two(v) => v.len(),
            VertexTable::Three(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Position> {
        match self {
            VertexTable::Two(v) => v.get(index).copied().map(Position::Two),
            VertexTable::Three(v) => v.get(index).copied().map(Position::Three),
        }
    }

    /// Checks that `position` fits this table without touching it.
    pub fn check_position(&self, position: &Position) -> Result<(), MapError> {
        let expected = self.dimensionality().get();
        let found = position.dimension();
        if expected == found {
            Ok(())
        } else {
            Err(MapError::DimensionMismatch { expected, found })
        }
    }

    pub fn push(&mut self, position: Position) -> Result<(), MapError> {
        match (self, position) {
            (VertexTable::Two(v), Position::Two(p)) => v.push(p),
            (VertexTable::Three(v), Position::Three(p)) => v.push(p),
            (table, position) => {
                return Err(MapError::DimensionMismatch {
                    expected: table.dimensionality().get(),
                    found: position.dimension(),
                });
            }
        }
        Ok(())
    }

    /// Overwrites the record at `index`. The caller checks the bounds.
    pub(crate) fn set(&mut self, index: usize, position: Position) -> Result<(), MapError> {
        match (self, position) {
            (VertexTable::Two(v), Position::Two(p)) => v[index] = p,
            (VertexTable::Three(v), Position::Three(p)) => v[index] = p,
            (table, position) => {
                return Err(MapError::DimensionMismatch {
                    expected: table.dimensionality().get(),
                    found: position.dimension(),
                });
            }
        }
        Ok(())
    }

    /// Moves the record at `keep` to the midpoint of `keep` and `gone`. The
    /// caller checks the bounds.
    pub(crate) fn merge(&mut self, keep: usize, gone: usize) {
        match self {
            VertexTable::Two(v) => v[keep].data = midpoint(v[keep].data, v[gone].data),
            VertexTable::Three(v) => v[keep].data = midpoint(v[keep].data, v[gone].data),
        }
    }

    /// Appends a copy of the record at `index`.
    pub(crate) fn duplicate(&mut self, index: usize) {
        match self {
            VertexTable::Two(v) => {
                let p = v[index];
                v.push(p);
            }
            VertexTable::Three(v) => {
                let p = v[index];
                v.push(p);
            }
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        match self {
            VertexTable::Two(v) => v.reserve(additional),
            VertexTable::Three(v) => v.reserve(additional),
        }
    }

    /// Raw bytes of the table, in accelerator layout.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            VertexTable::Two(v) => bytemuck::cast_slice(v),
            VertexTable::Three(v) => bytemuck::cast_slice(v),
        }
    }

    /// Rebuilds a table from raw bytes, e.g. a buffer read back from a device.
    pub fn from_bytes(dimensionality: Dimensionality, bytes: &[u8]) -> Result<Self, MapError> {
        fn read<V: Pod>(bytes: &[u8]) -> Result<Vec<V>, MapError> {
            let size = std::mem::size_of::<V>();
            if bytes.len() % size != 0 {
                return Err(MapError::MalformedTables(format!(
                    "vertex buffer of {} bytes is not a multiple of the {size}-byte record",
                    bytes.len()
                )));
            }
            Ok(bytes
                .chunks_exact(size)
                .map(bytemuck::pod_read_unaligned)
                .collect())
        }
        Ok(match dimensionality {
            Dimensionality::Two => VertexTable::Two(read(bytes)?),
            Dimensionality::Three => VertexTable::Three(read(bytes)?),
        })
    }
}
