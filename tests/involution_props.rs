mod util;

use cmap_grid::mesh_generation::{GridBuilder, unit_grid};
use cmap_grid::prelude::*;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Involution(usize, usize),
    Next(usize, usize),
    Unlink(usize),
}

fn op(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..n, 0..n).prop_map(|(a, b)| Op::Involution(a, b)),
        (0..n, 0..n).prop_map(|(a, b)| Op::Next(a, b)),
        (0..n).prop_map(Op::Unlink),
    ]
}

proptest! {
    #[test]
    fn random_linking_keeps_the_tables_consistent(ops in prop::collection::vec(op(12), 0..64)) {
        let mut map = CombinatorialMap::new(Dimensionality::Two);
        let v = map.add_vertex((0.0, 0.0)).unwrap();
        let ds = map.add_darts([v; 12]).unwrap();
        for op in ops {
            match op {
                Op::Involution(a, b) => map.link_involution(ds[a], ds[b]).unwrap(),
                Op::Next(a, b) => map.link_next(ds[a], ds[b]).unwrap(),
                Op::Unlink(a) => map.unlink(Relation::Involution, ds[a]).unwrap(),
            }
            prop_assert!(map.validate_invariants().is_ok());
        }
        util::assert_involutions(&map);

        // every orbit terminates, with or without an error
        for d in map.darts() {
            for policy in [OrbitPolicy::Face, OrbitPolicy::Vertex, OrbitPolicy::Volume] {
                let steps = map.orbit(d, policy).unwrap().count();
                prop_assert!(steps <= map.dart_count() + 1);
            }
        }
    }

    #[test]
    fn grid_counts_follow_the_closed_forms(nx in 1usize..6, ny in 1usize..6, split in any::<bool>()) {
        let map = GridBuilder::<2>::default()
            .n_cells([nx, ny])
            .lens([1.0, 2.0])
            .split_cells(split)
            .build()
            .unwrap();
        let per_cell = if split { 6 } else { 4 };
        prop_assert_eq!(map.dart_count(), per_cell * nx * ny);
        prop_assert_eq!(map.faces().unwrap().len(), (if split { 2 } else { 1 }) * nx * ny);
        prop_assert_eq!(util::orbit_count(&map, OrbitPolicy::Vertex), (nx + 1) * (ny + 1));
        prop_assert!(validate_map(&map, ValidationOptions::all()).is_ok());
    }

    #[test]
    fn positions_survive_storage(x in any::<f32>(), y in any::<f32>()) {
        let mut map = unit_grid(1, 1).unwrap();
        let v = map.add_vertex((x, y)).unwrap();
        let Position::Two(back) = map.position_of(v).unwrap() else {
            panic!("2D map returned a 3D position");
        };
        prop_assert_eq!(back.x().to_bits(), x.to_bits());
        prop_assert_eq!(back.y().to_bits(), y.to_bits());
    }
}
