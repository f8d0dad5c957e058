//! Strong, zero-cost handles for darts, vertices and derived cells.
//!
//! Topology and geometry are cross-referenced by index only, never by
//! address, so the same ids stay meaningful after the tables are copied to
//! or from an accelerator. Each entity kind gets its own newtype so a dart
//! index can never be passed where a vertex index is expected.
//!
//! - [`DartId`] wraps a `NonZeroU32`: index `0` is reserved as the null dart
//!   (the "unlinked" marker inside raw beta tables). `Option<DartId>` is
//!   therefore exactly as large as a `u32`.
//! - [`VertexId`] is a plain dense `u32` index into the vertex table.
//! - [`EdgeId`], [`FaceId`] and [`VolumeId`] are computed views: the smallest
//!   dart of the corresponding orbit. They are never stored.

use std::{fmt, num::NonZeroU32};

use bytemuck::{Pod, Zeroable};

use crate::map_error::MapError;

/// Raw index of the null dart inside beta tables.
pub const NULL_DART: u32 = 0;

/// Identifier of a dart.
///
/// # Memory layout
/// `repr(transparent)` over `NonZeroU32`, so it has the ABI of a `u32`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct DartId(NonZeroU32);

impl DartId {
    /// Creates a new `DartId` from a raw `u32` value.
    ///
    /// Returns [`MapError::InvalidReference`] if `raw == 0`, the null dart.
    ///
    /// ```rust
    /// # use cmap_grid::topology::ids::DartId;
    /// let d = DartId::new(1).unwrap();
    /// assert_eq!(d.get(), 1);
    /// assert!(DartId::new(0).is_err());
    /// ```
    #[inline]
    pub fn new(raw: u32) -> Result<Self, MapError> {
        NonZeroU32::new(raw)
            .map(DartId)
            .ok_or(MapError::unknown_dart(raw))
    }

    /// Wraps a raw beta image; `0` maps to `None`.
    #[inline]
    pub(crate) fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(DartId)
    }

    /// Returns the inner `u32` value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Row of this dart in the dart table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl fmt::Debug for DartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DartId").field(&self.get()).finish()
    }
}

impl fmt::Display for DartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl TryFrom<u32> for DartId {
    type Error = MapError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        DartId::new(raw)
    }
}

/// Identifier of a vertex record.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Pod,
    Zeroable,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(u32);

impl VertexId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        VertexId(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.get()).finish()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<u32> for VertexId {
    fn from(raw: u32) -> Self {
        VertexId(raw)
    }
}

macro_rules! cell_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(DartId);

        impl $name {
            /// Smallest dart of the orbit this cell is made of.
            #[inline]
            pub const fn dart(self) -> DartId {
                self.0
            }

            #[inline]
            pub const fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl From<DartId> for $name {
            fn from(d: DartId) -> Self {
                $name(d)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }
    };
}

cell_id!(
    /// Edge identifier, computed from the edge orbit of a dart.
    EdgeId
);
cell_id!(
    /// Face identifier, computed from the face orbit of a dart.
    FaceId
);
cell_id!(
    /// Volume identifier, computed from the volume orbit of a dart.
    VolumeId
);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_dart_is_rejected() {
        assert_eq!(DartId::new(NULL_DART), Err(MapError::unknown_dart(0)));
        assert_eq!(DartId::from_raw(NULL_DART), None);
    }

    #[test]
    fn debug_and_display() {
        let d = DartId::new(7).unwrap();
        assert_eq!(format!("{d:?}"), "DartId(7)");
        assert_eq!(format!("{d}"), "7");
        let v = VertexId::new(3);
        assert_eq!(format!("{v:?}"), "VertexId(3)");
        let f = FaceId::from(d);
        assert_eq!(format!("{f:?}"), "FaceId(7)");
        assert_eq!(f.dart(), d);
    }

    #[test]
    fn ordering_follows_raw_index() {
        let a = DartId::new(1).unwrap();
        let b = DartId::new(2).unwrap();
        assert!(a < b);
        assert_eq!(b.index(), 2);
    }

    #[test]
    fn json_representation_is_the_raw_integer() {
        let d = DartId::new(123).unwrap();
        let s = serde_json::to_string(&d).unwrap();
        assert_eq!(s, "123");
        let back: DartId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<DartId>("0").is_err());
    }
}
