//! Cells as computed views over dart orbits.
//!
//! An edge, face or volume is never stored: its id is the smallest dart of
//! the corresponding orbit, so topology stays the single source of truth.
//! Full enumerations are cached until the next topology mutation.

use once_cell::sync::OnceCell;

use crate::map_error::MapError;
use crate::topology::cmap::CombinatorialMap;
use crate::topology::ids::{DartId, EdgeId, FaceId, VolumeId};
use crate::topology::orbit::OrbitPolicy;

/// Lazily computed cell enumerations.
#[derive(Clone, Debug, Default)]
pub struct CellCache {
    edges: OnceCell<Vec<EdgeId>>,
    faces: OnceCell<Vec<FaceId>>,
    volumes: OnceCell<Vec<VolumeId>>,
}

impl CombinatorialMap {
    fn orbit_min(&self, d: DartId, policy: OrbitPolicy) -> Result<DartId, MapError> {
        itertools::process_results(self.orbit(d, policy)?, |darts| darts.min())?
            .ok_or(MapError::unknown_dart(d.get()))
    }

    /// Edge containing `d`.
    pub fn edge_id(&self, d: DartId) -> Result<EdgeId, MapError> {
        self.orbit_min(d, OrbitPolicy::Edge).map(EdgeId::from)
    }

    /// Face containing `d`.
    pub fn face_id(&self, d: DartId) -> Result<FaceId, MapError> {
        self.orbit_min(d, OrbitPolicy::Face).map(FaceId::from)
    }

    /// Volume containing `d`.
    pub fn volume_id(&self, d: DartId) -> Result<VolumeId, MapError> {
        self.orbit_min(d, OrbitPolicy::Volume).map(VolumeId::from)
    }

    /// All edges, sorted.
    pub fn edges(&self) -> Result<&[EdgeId], MapError> {
        self.cell_cache()
            .edges
            .get_or_try_init(|| self.enumerate(OrbitPolicy::Edge))
            .map(Vec::as_slice)
    }

    /// All faces, sorted.
    pub fn faces(&self) -> Result<&[FaceId], MapError> {
        self.cell_cache()
            .faces
            .get_or_try_init(|| self.enumerate(OrbitPolicy::Face))
            .map(Vec::as_slice)
    }

    /// All volumes, sorted. In a 2D map these are the connected components.
    pub fn volumes(&self) -> Result<&[VolumeId], MapError> {
        self.cell_cache()
            .volumes
            .get_or_try_init(|| self.enumerate(OrbitPolicy::Volume))
            .map(Vec::as_slice)
    }

    // Darts are visited in increasing order, so the first unmarked dart of
    // an orbit is its minimum and the output comes out sorted.
    fn enumerate<C: From<DartId>>(&self, policy: OrbitPolicy) -> Result<Vec<C>, MapError> {
        let mut marked = vec![false; self.dart_count() + 1];
        let mut cells = Vec::new();
        for d in self.darts() {
            if marked[d.index()] {
                continue;
            }
            for member in self.orbit(d, policy)? {
                marked[member?.index()] = true;
            }
            cells.push(C::from(d));
        }
        Ok(cells)
    }
}
