//! Geometry records and bulk table views.
//!
//! `coordinates` holds the compact vertex records and the vertex table;
//! `device` exposes a map's tables in the layout an accelerator expects.

pub mod coordinates;
pub mod device;

pub use coordinates::{CuVertex2, CuVertex3, Position, VertexTable};
pub use device::DeviceTables;
