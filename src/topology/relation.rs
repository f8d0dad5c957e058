//! Relations between darts and map-level configuration.
//!
//! A map of dimensionality `n` stores `n + 1` beta relations per dart:
//!
//! | [`Relation`]        | beta | kind                                  |
//! |---------------------|------|---------------------------------------|
//! | `Previous`          | β0   | inverse of `Next`                     |
//! | `Next`              | β1   | permutation of the darts of a face    |
//! | `Involution`        | β2   | edge adjacency between two faces      |
//! | `VolumeInvolution`  | β3   | face adjacency between two volumes    |

use std::fmt;

use crate::map_error::MapError;

/// Dimensionality of a combinatorial map. Fixes both the number of beta
/// relations and the coordinate record used by the vertex table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Dimensionality {
    #[default]
    Two,
    Three,
}

impl Dimensionality {
    /// Number of spatial dimensions (2 or 3).
    #[inline]
    pub const fn get(self) -> usize {
        match self {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }

    /// Number of `u32` entries per dart row in the beta table (β0..βn).
    #[inline]
    pub const fn stride(self) -> usize {
        self.get() + 1
    }

    /// Whether maps of this dimensionality carry `relation`.
    #[inline]
    pub const fn supports(self, relation: Relation) -> bool {
        relation.beta_index() < self.stride()
    }

    pub(crate) fn check(self, relation: Relation) -> Result<(), MapError> {
        if self.supports(relation) {
            Ok(())
        } else {
            Err(MapError::Configuration(format!(
                "relation {relation} is not available in a {}D map",
                self.get()
            )))
        }
    }
}

impl TryFrom<usize> for Dimensionality {
    type Error = MapError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimensionality::Two),
            3 => Ok(Dimensionality::Three),
            other => Err(MapError::Configuration(format!(
                "dimensionality must be 2 or 3, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.get())
    }
}

/// Relation followed by a traversal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// β0, the inverse of [`Relation::Next`].
    Previous,
    /// β1, the next dart of the same face.
    Next,
    /// β2, the self-inverse edge relation.
    Involution,
    /// β3, the self-inverse face relation of 3D maps.
    VolumeInvolution,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Previous,
        Relation::Next,
        Relation::Involution,
        Relation::VolumeInvolution,
    ];

    /// Column of this relation in a dart row.
    #[inline]
    pub const fn beta_index(self) -> usize {
        match self {
            Relation::Previous => 0,
            Relation::Next => 1,
            Relation::Involution => 2,
            Relation::VolumeInvolution => 3,
        }
    }

    #[inline]
    pub const fn is_involution(self) -> bool {
        matches!(self, Relation::Involution | Relation::VolumeInvolution)
    }

    /// The relation undoing a step along `self`.
    #[inline]
    pub const fn inverse(self) -> Relation {
        match self {
            Relation::Previous => Relation::Next,
            Relation::Next => Relation::Previous,
            r => r,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "β{}", self.beta_index())
    }
}

/// Growth behaviour of the dart and vertex tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum GrowthPolicy {
    /// Tables are sized up front; capacities must be non-zero and are hard limits.
    Fixed,
    /// Tables grow on demand; capacities are reservations and may be zero.
    #[default]
    Adaptive,
}

/// Construction parameters of a [`CombinatorialMap`](crate::topology::cmap::CombinatorialMap).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapConfig {
    pub dimensionality: Dimensionality,
    /// Expected number of darts, excluding the null dart.
    pub dart_capacity: usize,
    pub vertex_capacity: usize,
    pub growth: GrowthPolicy,
}

impl MapConfig {
    /// A fixed-capacity configuration.
    pub fn fixed(dimensionality: Dimensionality, darts: usize, vertices: usize) -> Self {
        Self {
            dimensionality,
            dart_capacity: darts,
            vertex_capacity: vertices,
            growth: GrowthPolicy::Fixed,
        }
    }

    /// A growable configuration with the given reservations.
    pub fn adaptive(dimensionality: Dimensionality, darts: usize, vertices: usize) -> Self {
        Self {
            dimensionality,
            dart_capacity: darts,
            vertex_capacity: vertices,
            growth: GrowthPolicy::Adaptive,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), MapError> {
        if self.growth == GrowthPolicy::Fixed {
            if self.dart_capacity == 0 {
                return Err(MapError::Configuration(
                    "dart capacity must be non-zero for a fixed-size map".into(),
                ));
            }
            if self.vertex_capacity == 0 {
                return Err(MapError::Configuration(
                    "vertex capacity must be non-zero for a fixed-size map".into(),
                ));
            }
        }
        // row 0 is the null dart, hence the strict bound
        if self.dart_capacity >= u32::MAX as usize {
            return Err(MapError::Configuration(format!(
                "dart capacity {} does not fit 32-bit dart ids",
                self.dart_capacity
            )));
        }
        if self.vertex_capacity > u32::MAX as usize {
            return Err(MapError::Configuration(format!(
                "vertex capacity {} does not fit 32-bit vertex ids",
                self.vertex_capacity
            )));
        }
        Ok(())
    }
}
