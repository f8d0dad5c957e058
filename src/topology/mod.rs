//! Combinatorial map topology.
//!
//! This module holds the dart store and everything computed from it:
//! - strong ids for darts, vertices and derived cells
//! - relations, dimensionality and construction parameters
//! - the [`CombinatorialMap`] store with its linking operations
//! - lazy orbit iterators and cell enumeration
//! - structural validation of raw tables
//!
//! Most users will build a map through [`CombinatorialMap`] or
//! [`GridBuilder`](crate::mesh_generation::GridBuilder) and walk it with
//! [`CombinatorialMap::orbit`].

pub mod cache;
pub mod cells;
pub mod cmap;
pub mod ids;
pub mod orbit;
pub mod relation;
pub mod validation;

pub use cache::InvalidateCache;
pub use cmap::{CombinatorialMap, RawTables};
pub use ids::{DartId, EdgeId, FaceId, VertexId, VolumeId};
pub use orbit::{Orbit, OrbitPolicy};
pub use relation::{Dimensionality, GrowthPolicy, MapConfig, Relation};

#[cfg(test)]
mod tests;
