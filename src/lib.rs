#![cfg_attr(docsrs, feature(doc_cfg))]
//! # cmap-grid
//!
//! cmap-grid stores mesh topology as a combinatorial map: every boundary
//! relation between mesh elements is encoded by darts, each holding the
//! indices of its neighbouring darts (the beta relations) and of the vertex it
//! starts at. Vertex positions live in a separate dense table of compact
//! `f32` records whose layout can be copied to accelerator memory as is.
//!
//! ## Features
//! - 2D and 3D maps with strong dart and vertex ids, validated linking and
//!   fail-clean mutation
//! - Lazy, bounded orbit iterators and edge/face/volume ids computed from
//!   orbits
//! - Regular quad, triangle and hexahedral grid generation with data-parallel
//!   kernels (`rayon` feature)
//! - Flat device-layout tables with a validated import path
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! cmap-grid = "0.1"
//! # Optional features:
//! # features = ["rayon", "strict-invariants"]
//! ```
//!
//! ```rust
//! use cmap_grid::prelude::*;
//!
//! let map = GridBuilder::<2>::default()
//!     .n_cells([2, 2])
//!     .lens([1.0, 1.0])
//!     .build()?;
//! let d = map.darts().next().unwrap();
//! assert_eq!(map.orbit(d, OrbitPolicy::Face)?.count(), 4);
//! assert_eq!(map.faces()?.len(), 4);
//! # Ok::<(), MapError>(())
//! ```
//!
//! ## Invariants
//! Enable `strict-invariants` to run the map's structural checks after
//! generation in release builds too; they always run under
//! `debug_assertions`.

pub mod data;
pub mod debug_invariants;
pub mod map_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::coordinates::{CuVertex2, CuVertex3, Position, VertexTable};
    pub use crate::data::device::DeviceTables;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::map_error::MapError;
    pub use crate::mesh_generation::GridBuilder;
    pub use crate::topology::cmap::{CombinatorialMap, RawTables};
    pub use crate::topology::ids::{DartId, EdgeId, FaceId, VertexId, VolumeId};
    pub use crate::topology::orbit::{Orbit, OrbitPolicy};
    pub use crate::topology::relation::{Dimensionality, GrowthPolicy, MapConfig, Relation};
    pub use crate::topology::validation::{ValidationOptions, validate_map};
}
