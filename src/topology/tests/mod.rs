mod validation_tests;

use crate::topology::cmap::CombinatorialMap;
use crate::topology::ids::{DartId, VertexId};

/// The unit square of the usage scenario: four vertices, one dart per vertex,
/// darts chained into a single face.
pub(super) fn unit_square() -> (CombinatorialMap, Vec<VertexId>, Vec<DartId>) {
    let mut map = CombinatorialMap::create(2, 4, 4).unwrap();
    let vs: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .map(|p| map.add_vertex(p).unwrap())
        .collect();
    let ds: Vec<_> = vs.iter().map(|&v| map.add_dart(v).unwrap()).collect();
    for i in 0..4 {
        map.link_next(ds[i], ds[(i + 1) % 4]).unwrap();
    }
    (map, vs, ds)
}
