//! MapError: unified error type for cmap-grid public APIs
//!
//! Every fallible operation of the combinatorial map store reports one of
//! these variants synchronously. A failing operation never leaves the map
//! partially mutated.

use std::fmt;
use thiserror::Error;

/// Kind of identifier carried by [`MapError::InvalidReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Dart,
    Vertex,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKind::Dart => f.write_str("dart"),
            IdKind::Vertex => f.write_str("vertex"),
        }
    }
}

/// Unified error type for combinatorial map operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Construction parameters are invalid (dimensionality, capacities,
    /// grid parameters, or a relation the map's dimensionality lacks).
    #[error("configuration error: {0}")]
    Configuration(String),
    /// An identifier that was never issued by this map.
    #[error("invalid reference: {kind} `{id}` does not belong to this map")]
    InvalidReference { kind: IdKind, id: u32 },
    /// An orbit failed to close, or a relation step had no image.
    #[error("malformed topology at dart `{start}`: {detail}")]
    MalformedTopology { start: u32, detail: String },
    /// Imported tables violate a structural invariant.
    #[error("malformed tables: {0}")]
    MalformedTables(String),
    /// A position of the wrong dimension was supplied.
    #[error("dimension mismatch: expected a {expected}D position, found {found}D")]
    DimensionMismatch { expected: usize, found: usize },
    /// A fixed-capacity map has no room left in one of its tables.
    #[error("capacity exceeded: {table} table is full ({capacity} entries)")]
    CapacityExceeded { table: &'static str, capacity: usize },
}

impl MapError {
    #[inline]
    pub(crate) fn unknown_dart(id: u32) -> Self {
        MapError::InvalidReference {
            kind: IdKind::Dart,
            id,
        }
    }

    #[inline]
    pub(crate) fn unknown_vertex(id: u32) -> Self {
        MapError::InvalidReference {
            kind: IdKind::Vertex,
            id,
        }
    }

    /// Returns `true` for [`MapError::InvalidReference`].
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, MapError::InvalidReference { .. })
    }

    /// Returns `true` for [`MapError::MalformedTopology`] and
    /// [`MapError::MalformedTables`].
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            MapError::MalformedTopology { .. } | MapError::MalformedTables(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_id() {
        let e = MapError::unknown_vertex(12);
        assert_eq!(
            e.to_string(),
            "invalid reference: vertex `12` does not belong to this map"
        );
        assert!(e.is_invalid_reference());
        assert!(!e.is_malformed());
    }

    #[test]
    fn malformed_covers_both_variants() {
        let a = MapError::MalformedTopology {
            start: 3,
            detail: "open face".into(),
        };
        let b = MapError::MalformedTables("bad stride".into());
        assert!(a.is_malformed());
        assert!(b.is_malformed());
    }
}
