use cmap_grid::mesh_generation::{hex_grid, unit_grid};
use cmap_grid::prelude::*;

#[test]
fn device_view_describes_the_tables() {
    let map = hex_grid(1, 1, 2).unwrap();
    let view = map.device_tables();
    assert_eq!(view.dimensionality, Dimensionality::Three);
    assert_eq!(view.stride, 4);
    assert_eq!(view.n_darts(), 48);
    assert_eq!(view.betas.len(), 49 * 4);
    assert_eq!(view.vertex_bytes.len(), 12 * std::mem::size_of::<CuVertex3>());
    let row = view.beta_row(1).unwrap();
    assert_eq!(row[1], 2);
    assert_eq!(row[0], 4);
}

#[test]
fn tables_copied_back_are_validated() {
    let map = unit_grid(2, 2).unwrap();
    let view = map.device_tables();

    let raw = RawTables::from_device(
        view.dimensionality,
        view.betas,
        view.vertex_refs,
        view.vertex_bytes,
    )
    .unwrap();
    let back = CombinatorialMap::from_raw_tables(raw).unwrap();
    assert_eq!(back.to_raw_tables(), map.to_raw_tables());

    // a β2 that is not self-inverse
    let mut betas = view.betas.to_vec();
    let stride = view.stride;
    let (a, b) = (1, 5);
    betas[a * stride + 2] = b as u32;
    let raw = RawTables::from_device(view.dimensionality, &betas, view.vertex_refs, view.vertex_bytes)
        .unwrap();
    assert!(CombinatorialMap::from_raw_tables(raw).unwrap_err().is_malformed());

    // a vertex reference past the table
    let mut refs = view.vertex_refs.to_vec();
    refs[3] = 1_000;
    let raw = RawTables::from_device(view.dimensionality, view.betas, &refs, view.vertex_bytes)
        .unwrap();
    assert!(CombinatorialMap::from_raw_tables(raw).is_err());

    // truncated vertex buffer
    assert!(
        RawTables::from_device(
            view.dimensionality,
            view.betas,
            view.vertex_refs,
            &view.vertex_bytes[1..]
        )
        .is_err()
    );
}

#[test]
fn mismatched_vertex_table_is_rejected() {
    let mut raw = unit_grid(1, 1).unwrap().into_raw_tables();
    raw.vertices = VertexTable::Three(vec![CuVertex3::default(); 4]);
    assert!(matches!(
        CombinatorialMap::from_raw_tables(raw),
        Err(MapError::MalformedTables(_))
    ));
}

#[test]
fn json_round_trip_preserves_the_map() {
    let map = unit_grid(2, 1).unwrap();
    let json = serde_json::to_string(&map).unwrap();
    let back: CombinatorialMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_raw_tables(), map.to_raw_tables());
    assert_eq!(back.faces().unwrap(), map.faces().unwrap());
}

#[test]
fn bincode_round_trip_preserves_the_map() {
    let map = hex_grid(1, 1, 1).unwrap();
    let bytes = bincode::serialize(&map).unwrap();
    let back: CombinatorialMap = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back.to_raw_tables(), map.to_raw_tables());
}

#[test]
fn deserialization_rejects_corrupt_tables() {
    let mut raw = unit_grid(1, 1).unwrap().into_raw_tables();
    raw.betas[3 + 1] = 42;
    let json = serde_json::to_string(&raw).unwrap();
    assert!(serde_json::from_str::<CombinatorialMap>(&json).is_err());
}
