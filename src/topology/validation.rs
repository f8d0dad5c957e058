//! Structural validation of beta and vertex-reference tables.
//!
//! [`validate_tables`] is the gate for anything entering a map from outside
//! (raw table import, deserialization, device read-back) and also backs
//! [`DebugInvariants`](crate::debug_invariants::DebugInvariants) for the map
//! itself. [`validate_map`] adds optional, stricter topological checks.

use crate::map_error::MapError;
use crate::topology::cmap::CombinatorialMap;
use crate::topology::ids::NULL_DART;
use crate::topology::relation::{Dimensionality, Relation};

/// Optional checks run by [`validate_map`] on top of the table invariants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Every dart has a successor and a predecessor, so all faces are closed.
    pub check_closed_faces: bool,
    /// Involution partners run in opposite directions: the partner of `d`
    /// starts at the vertex where `d` ends.
    pub check_vertex_consistency: bool,
}

impl ValidationOptions {
    /// Enable all validation checks.
    pub fn all() -> Self {
        Self {
            check_closed_faces: true,
            check_vertex_consistency: true,
        }
    }
}

/// Checks the structural invariants of a set of tables.
///
/// - `betas` holds one row of `dimensionality.stride()` entries per entry
///   of `vertex_refs`, and there is at least the null row;
/// - the null row is all zero, as is its vertex reference;
/// - every image is a known dart;
/// - β2 (and β3) are self-inverse and β0 is the inverse of β1 where linked;
/// - every non-null dart references an existing vertex.
///
/// Returns [`MapError::MalformedTables`] describing the first violation.
pub fn validate_tables(
    dimensionality: Dimensionality,
    betas: &[u32],
    vertex_refs: &[u32],
    vertex_count: usize,
) -> Result<(), MapError> {
    let stride = dimensionality.stride();
    let rows = vertex_refs.len();
    if rows == 0 {
        return Err(MapError::MalformedTables(
            "tables lack the null dart row".into(),
        ));
    }
    if betas.len() != rows * stride {
        return Err(MapError::MalformedTables(format!(
            "beta table has {} entries, expected {rows} rows of {stride}",
            betas.len()
        )));
    }
    if betas[..stride].iter().any(|&b| b != NULL_DART) || vertex_refs[0] != 0 {
        return Err(MapError::MalformedTables(
            "null dart row must be all zero".into(),
        ));
    }

    let beta = |d: usize, r: Relation| betas[d * stride + r.beta_index()] as usize;

    for d in 1..rows {
        let row = &betas[d * stride..(d + 1) * stride];
        if let Some(&bad) = row.iter().find(|&&b| b as usize >= rows) {
            return Err(MapError::MalformedTables(format!(
                "dart {d} points to unknown dart {bad}"
            )));
        }
        if vertex_refs[d] as usize >= vertex_count {
            return Err(MapError::MalformedTables(format!(
                "dart {d} references unknown vertex {}",
                vertex_refs[d]
            )));
        }
        for r in Relation::ALL {
            if !dimensionality.supports(r) {
                continue;
            }
            let image = beta(d, r);
            if image == NULL_DART as usize {
                continue;
            }
            if beta(image, r.inverse()) != d {
                return Err(MapError::MalformedTables(format!(
                    "{r}({d}) = {image} but {}({image}) = {}",
                    r.inverse(),
                    beta(image, r.inverse())
                )));
            }
        }
    }
    Ok(())
}

/// Validates a map against its table invariants and the selected options.
pub fn validate_map(map: &CombinatorialMap, options: ValidationOptions) -> Result<(), MapError> {
    validate_tables(
        map.dimensionality(),
        map.beta_table(),
        map.vertex_refs(),
        map.vertex_count(),
    )?;

    if options.check_closed_faces {
        for d in map.darts() {
            for r in [Relation::Next, Relation::Previous] {
                if map.is_free(d, r)? {
                    return Err(MapError::MalformedTopology {
                        start: d.get(),
                        detail: format!("face is open: dart has no {r} image"),
                    });
                }
            }
        }
    }

    if options.check_vertex_consistency {
        let involutions = [Relation::Involution, Relation::VolumeInvolution];
        for d in map.darts() {
            let Some(next) = map.partner(d, Relation::Next)? else {
                continue;
            };
            let end = map.vertex_of(next)?;
            for r in involutions {
                if !map.dimensionality().supports(r) {
                    continue;
                }
                if let Some(partner) = map.partner(d, r)? {
                    let start = map.vertex_of(partner)?;
                    if start != end {
                        return Err(MapError::MalformedTopology {
                            start: d.get(),
                            detail: format!(
                                "{r} partner {partner} starts at vertex {start}, expected {end}"
                            ),
                        });
                    }
                }
            }
        }
    }

    log::trace!(
        "validated {} map with {} darts",
        map.dimensionality(),
        map.dart_count()
    );
    Ok(())
}
