//! Mesh types, element geometry and generators
//!
//! This module provides the hexahedral/tetrahedral mesh data model used by
//! point location and field transfer.

mod bbox;
mod generators;
mod geometry;
mod types;

pub use bbox::BoundingBox;
pub use generators::*;
pub use types::*;
