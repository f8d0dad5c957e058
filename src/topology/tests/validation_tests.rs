use super::unit_square;
use crate::map_error::MapError;
use crate::topology::cmap::CombinatorialMap;
use crate::topology::relation::{Dimensionality, Relation};
use crate::topology::validation::{ValidationOptions, validate_map, validate_tables};

#[test]
fn closed_square_passes_every_check() {
    let (map, _, _) = unit_square();
    validate_map(&map, ValidationOptions::all()).unwrap();
}

#[test]
fn open_face_fails_closed_face_check() {
    let (mut map, _, ds) = unit_square();
    map.unlink(Relation::Next, ds[3]).unwrap();
    validate_map(&map, ValidationOptions::default()).unwrap();
    let err = validate_map(
        &map,
        ValidationOptions {
            check_closed_faces: true,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, MapError::MalformedTopology { start: 1, .. }));
}

#[test]
fn involution_partners_must_run_backwards() {
    let mut grow = CombinatorialMap::new(Dimensionality::Two);
    let vs = grow.add_vertices([(0.0, 0.0), (1.0, 0.0)]).unwrap();
    let ds2 = grow.add_darts([vs[0], vs[1], vs[1], vs[0]]).unwrap();
    // two digons sharing the edge v0-v1
    grow.link_next(ds2[0], ds2[1]).unwrap();
    grow.link_next(ds2[1], ds2[0]).unwrap();
    grow.link_next(ds2[2], ds2[3]).unwrap();
    grow.link_next(ds2[3], ds2[2]).unwrap();
    grow.link_involution(ds2[0], ds2[2]).unwrap();
    validate_map(&grow, ValidationOptions::all()).unwrap();

    grow.link_involution(ds2[0], ds2[3]).unwrap();
    assert!(validate_map(&grow, ValidationOptions::all()).is_err());

    // d0 runs v0 -> v1 but d2 starts at v2
    let (mut map, _, ds) = unit_square();
    map.link_involution(ds[0], ds[2]).unwrap();
    assert!(validate_map(&map, ValidationOptions::all()).is_err());
}

#[test]
fn table_shape_is_checked() {
    let dim = Dimensionality::Two;
    assert!(validate_tables(dim, &[], &[], 0).is_err());
    assert!(validate_tables(dim, &[0, 0, 0, 0], &[0, 0], 1).is_err());
    assert!(validate_tables(dim, &[1, 0, 0], &[0], 0).is_err());
    assert!(validate_tables(dim, &[0, 0, 0], &[0], 0).is_ok());
    // β1(1) = 1 but β0(1) = 0
    let err = validate_tables(dim, &[0, 0, 0, 0, 1, 0], &[0, 0], 1).unwrap_err();
    assert!(matches!(err, MapError::MalformedTables(_)));
}
