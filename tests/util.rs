#![allow(dead_code)]
use cmap_grid::prelude::*;

pub fn dart(raw: u32) -> DartId {
    DartId::new(raw).unwrap()
}

/// Assert every linked involution image maps back.
pub fn assert_involutions(map: &CombinatorialMap) {
    for d in map.darts() {
        for r in [Relation::Involution, Relation::VolumeInvolution] {
            if !map.dimensionality().supports(r) {
                continue;
            }
            let image = map.traverse(d, r).unwrap();
            assert_eq!(map.traverse(image, r).unwrap(), d, "{r} of {d}");
        }
    }
}

/// Number of darts unlinked on `relation`.
pub fn free_darts(map: &CombinatorialMap, relation: Relation) -> usize {
    map.darts()
        .filter(|&d| map.is_free(d, relation).unwrap())
        .count()
}

/// Number of distinct orbits of `policy`.
pub fn orbit_count(map: &CombinatorialMap, policy: OrbitPolicy) -> usize {
    let mut seen = vec![false; map.dart_count() + 1];
    let mut count = 0;
    for d in map.darts() {
        if seen[d.get() as usize] {
            continue;
        }
        count += 1;
        for member in map.orbit(d, policy).unwrap() {
            seen[member.unwrap().get() as usize] = true;
        }
    }
    count
}
